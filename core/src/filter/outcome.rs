use serde::Serialize;

/// Which extractor produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    Manufacturing,
    Analysis,
    Unsafe,
    Irrelevant,
}

impl SignalCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturing => "manufacturing",
            Self::Analysis => "analysis",
            Self::Unsafe => "unsafe",
            Self::Irrelevant => "irrelevant",
        }
    }
}

/// One extractor's verdict for a query. Created per call, never stored.
///
/// `matched_term` is the first matching keyword or pattern text and exists for
/// diagnostics only; presence/absence is what the decision engine consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationSignal {
    pub matched: bool,
    pub category: SignalCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_term: Option<String>,
}

impl ClassificationSignal {
    pub fn hit(category: SignalCategory, term: impl Into<String>) -> Self {
        Self {
            matched: true,
            category,
            matched_term: Some(term.into()),
        }
    }

    pub fn miss(category: SignalCategory) -> Self {
        Self {
            matched: false,
            category,
            matched_term: None,
        }
    }
}

/// The tri-state result of classifying one query. Exactly one outcome exists
/// per query; the variants are mutually exclusive and exhaustive, and nothing
/// reaches the analysis pipeline without an explicit `Allowed`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdmissionOutcome {
    /// In-domain and safe; forward the original query unmodified.
    Allowed {
        #[serde(skip_serializing_if = "Option::is_none")]
        signal: Option<ClassificationSignal>,
    },
    /// Matched an unsafe-content pattern; overrides domain relevance.
    RejectedUnsafe { signal: ClassificationSignal },
    /// Off-domain: matched an irrelevant topic, or matched nothing at all
    /// (closed-world allow-list; `signal` is `None` for the latter).
    RejectedOffDomain {
        #[serde(skip_serializing_if = "Option::is_none")]
        signal: Option<ClassificationSignal>,
    },
}

impl AdmissionOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Machine-readable outcome code, stable across interfaces.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Allowed { .. } => "allowed",
            Self::RejectedUnsafe { .. } => "rejected_unsafe",
            Self::RejectedOffDomain { .. } => "rejected_off_domain",
        }
    }

    pub fn signal(&self) -> Option<&ClassificationSignal> {
        match self {
            Self::Allowed { signal } | Self::RejectedOffDomain { signal } => signal.as_ref(),
            Self::RejectedUnsafe { signal } => Some(signal),
        }
    }
}
