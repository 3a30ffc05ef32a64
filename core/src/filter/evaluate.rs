//! Admission decision engine.
//!
//! The single entry point callers use is [`QueryGate::classify`]. Policy order
//! is fixed: unsafe content overrides domain relevance, a known off-domain
//! topic overrides an incidental domain keyword, and anything matching neither
//! way is denied (closed-world allow-list).

use tracing::debug;

use crate::config::FilterConfig;

use super::outcome::{AdmissionOutcome, ClassificationSignal, SignalCategory};
use super::signals::{KeywordSet, PatternSet};
use super::vocabulary;

/// Immutable classification engine. Built once at startup from the built-in
/// vocabulary plus any `FilterConfig` extensions; holds no per-call state, so
/// one instance can serve any number of concurrent classification calls.
///
/// "Reloading" configuration means building a new gate and swapping it in,
/// never mutating a live one.
pub struct QueryGate {
    manufacturing: KeywordSet,
    analysis: KeywordSet,
    unsafe_content: PatternSet,
    irrelevant: PatternSet,
}

impl QueryGate {
    /// Build the gate. Fails if any effective keyword/pattern list is empty or
    /// any pattern does not compile: a gate that cannot load its vocabulary
    /// must abort startup rather than run as a pass-all filter.
    pub fn from_config(cfg: &FilterConfig) -> anyhow::Result<Self> {
        let manufacturing = KeywordSet::compile(
            SignalCategory::Manufacturing,
            &merge(vocabulary::MANUFACTURING_KEYWORDS, &cfg.extra_keywords),
        )?;
        let analysis = KeywordSet::compile(
            SignalCategory::Analysis,
            &merge(vocabulary::ANALYSIS_KEYWORDS, &cfg.extra_analysis_keywords),
        )?;
        let unsafe_content = PatternSet::compile(
            SignalCategory::Unsafe,
            &merge(vocabulary::UNSAFE_PATTERNS, &cfg.extra_unsafe_patterns),
        )?;
        let irrelevant = PatternSet::compile(
            SignalCategory::Irrelevant,
            &merge(vocabulary::IRRELEVANT_PATTERNS, &cfg.extra_irrelevant_patterns),
        )?;

        debug!(
            manufacturing = manufacturing.len(),
            analysis = analysis.len(),
            unsafe_patterns = unsafe_content.len(),
            irrelevant_patterns = irrelevant.len(),
            "query gate compiled"
        );

        Ok(Self {
            manufacturing,
            analysis,
            unsafe_content,
            irrelevant,
        })
    }

    /// Classify one query. Deterministic and side-effect-free: identical input
    /// and configuration always yield the identical outcome, and no input
    /// string can make this return an error.
    pub fn classify(&self, query: &str) -> AdmissionOutcome {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return AdmissionOutcome::RejectedOffDomain { signal: None };
        }

        let outcome = self
            .stage_unsafe(&normalized)
            .or_else(|| self.stage_irrelevant(&normalized))
            .or_else(|| self.stage_domain(&normalized))
            // Closed world: a query must affirmatively match domain vocabulary.
            .unwrap_or(AdmissionOutcome::RejectedOffDomain { signal: None });

        debug!(
            outcome = outcome.code(),
            category = outcome.signal().map(|s| s.category.as_str()),
            "query classified"
        );

        outcome
    }

    /// Stage 1: safety overrides domain relevance.
    fn stage_unsafe(&self, text: &str) -> Option<AdmissionOutcome> {
        let signal = self.unsafe_content.scan(text);
        signal
            .matched
            .then_some(AdmissionOutcome::RejectedUnsafe { signal })
    }

    /// Stage 2: a known off-domain topic blocks even when a domain keyword
    /// also appears ("weather at the factory").
    fn stage_irrelevant(&self, text: &str) -> Option<AdmissionOutcome> {
        let signal = self.irrelevant.scan(text);
        signal.matched.then_some(AdmissionOutcome::RejectedOffDomain {
            signal: Some(signal),
        })
    }

    /// Stage 3: positive domain evidence from either keyword tier admits the
    /// query.
    fn stage_domain(&self, text: &str) -> Option<AdmissionOutcome> {
        for set in [&self.manufacturing, &self.analysis] {
            let signal = set.scan(text);
            if signal.matched {
                return Some(AdmissionOutcome::Allowed {
                    signal: Some(signal),
                });
            }
        }
        None
    }
}

fn merge(builtin: &[&str], extra: &[String]) -> Vec<String> {
    builtin
        .iter()
        .map(|s| s.to_string())
        .chain(extra.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> QueryGate {
        QueryGate::from_config(&FilterConfig::default()).unwrap()
    }

    #[test]
    fn unsafe_overrides_domain_keywords() {
        let out = gate()
            .classify("how to bypass safety interlocks on the production line to increase output");
        assert_eq!(out.code(), "rejected_unsafe");
        assert_eq!(out.signal().unwrap().category, SignalCategory::Unsafe);
    }

    #[test]
    fn irrelevant_topic_overrides_incidental_domain_keyword() {
        let out = gate().classify("What's the weather like at the factory today?");
        assert_eq!(out.code(), "rejected_off_domain");
        assert_eq!(out.signal().unwrap().category, SignalCategory::Irrelevant);
    }

    #[test]
    fn no_match_defaults_to_deny() {
        let out = gate().classify("asdfqwerty");
        assert_eq!(out, AdmissionOutcome::RejectedOffDomain { signal: None });
    }

    #[test]
    fn domain_keyword_admits() {
        let out = gate().classify("Compare defect rates between morning and evening shifts");
        assert!(out.is_allowed());
    }

    #[test]
    fn analysis_vocabulary_admits_generic_data_questions() {
        let out = gate().classify("Show me a chart of the data");
        assert!(out.is_allowed());
    }

    #[test]
    fn empty_and_whitespace_reject_without_panic() {
        assert_eq!(gate().classify("").code(), "rejected_off_domain");
        assert_eq!(gate().classify("   ").code(), "rejected_off_domain");
        assert_eq!(gate().classify("\t\n").code(), "rejected_off_domain");
    }

    #[test]
    fn classification_is_case_and_whitespace_insensitive() {
        let g = gate();
        assert_eq!(
            g.classify("SHOW ME production TRENDS").code(),
            g.classify("  show me production trends  ").code()
        );
    }

    #[test]
    fn classification_is_idempotent() {
        let g = gate();
        let q = "Tell me about the latest movies";
        assert_eq!(g.classify(q), g.classify(q));
    }

    #[test]
    fn config_extensions_take_effect() {
        let cfg = FilterConfig {
            extra_keywords: vec!["extrusion".into()],
            extra_irrelevant_patterns: vec![r"\bhoroscope\b".into()],
            ..Default::default()
        };
        let g = QueryGate::from_config(&cfg).unwrap();
        assert!(g.classify("extrusion line throughput").is_allowed());
        assert_eq!(g.classify("my horoscope for today").code(), "rejected_off_domain");
    }

    #[test]
    fn bad_extra_pattern_fails_construction() {
        let cfg = FilterConfig {
            extra_unsafe_patterns: vec!["(".into()],
            ..Default::default()
        };
        assert!(QueryGate::from_config(&cfg).is_err());
    }
}
