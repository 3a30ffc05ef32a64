//! Response composer: the fixed rejection-message catalog.
//!
//! Every interface (CLI, HTTP API, chat UI) renders the exact same text for
//! the same outcome, so the catalog lives here and callers never re-word it.

use super::outcome::AdmissionOutcome;

/// Shown when a query trips the unsafe-content matcher. Never includes the
/// matched text.
pub const SAFETY_BLOCKED_MESSAGE: &str = "I'm designed specifically for manufacturing data \
analysis and cannot assist with that type of content. Please ask questions about production \
data, quality metrics, efficiency analysis, or operational insights.";

/// Shown for off-domain queries: enumerates the five permitted query
/// categories and invites re-asking.
pub const OFF_DOMAIN_MESSAGE: &str = "I'm a specialized manufacturing data analysis assistant. \
I can only help with questions about:
- Production data and manufacturing metrics
- Quality analysis and defect tracking
- Efficiency and performance monitoring
- Equipment and operational insights
- Data visualization and trends

Please ask a manufacturing or industrial data-related question.";

/// Machine-readable error string for rejected queries in API responses.
pub const REJECTED_ERROR_MESSAGE: &str = "Query rejected by manufacturing domain safety filter";

/// Structured rejection fields callers surface in interface-appropriate form:
/// the CLI prints `message`, the API serializes all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposedRejection {
    pub error_code: &'static str,
    pub message: &'static str,
}

/// Compose the user-facing rejection for a non-`Allowed` outcome. Returns
/// `None` for `Allowed`: there is nothing to say, the caller proceeds to the
/// analysis pipeline.
pub fn compose_rejection(outcome: &AdmissionOutcome) -> Option<ComposedRejection> {
    match outcome {
        AdmissionOutcome::Allowed { .. } => None,
        AdmissionOutcome::RejectedUnsafe { .. } => Some(ComposedRejection {
            error_code: outcome.code(),
            message: SAFETY_BLOCKED_MESSAGE,
        }),
        AdmissionOutcome::RejectedOffDomain { .. } => Some(ComposedRejection {
            error_code: outcome.code(),
            message: OFF_DOMAIN_MESSAGE,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::outcome::{ClassificationSignal, SignalCategory};

    #[test]
    fn allowed_composes_nothing() {
        let out = AdmissionOutcome::Allowed { signal: None };
        assert!(compose_rejection(&out).is_none());
    }

    #[test]
    fn unsafe_rejection_never_echoes_matched_content() {
        let out = AdmissionOutcome::RejectedUnsafe {
            signal: ClassificationSignal::hit(SignalCategory::Unsafe, r"\b(weapon|bomb)\b"),
        };
        let composed = compose_rejection(&out).unwrap();
        assert_eq!(composed.error_code, "rejected_unsafe");
        assert_eq!(composed.message, SAFETY_BLOCKED_MESSAGE);
        assert!(!composed.message.contains("weapon"));
    }

    #[test]
    fn off_domain_message_lists_five_categories() {
        let out = AdmissionOutcome::RejectedOffDomain { signal: None };
        let composed = compose_rejection(&out).unwrap();
        assert_eq!(composed.message.lines().filter(|l| l.starts_with("- ")).count(), 5);
        assert!(composed.message.ends_with("data-related question."));
    }
}
