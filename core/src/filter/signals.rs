//! Signal extractors: pure text matchers over immutable keyword/pattern sets.
//!
//! Each set is compiled once at gate construction and only read afterwards, so
//! extraction is safe to run concurrently from any number of tasks.

use regex::{escape, Regex, RegexBuilder};

use super::outcome::{ClassificationSignal, SignalCategory};

/// A category-tagged set of domain terms, matched whole-word and
/// case-insensitively. No stemming, no fuzzy matching: the term list is
/// authoritative.
pub struct KeywordSet {
    category: SignalCategory,
    terms: Vec<String>,
    matcher: Regex,
}

impl KeywordSet {
    pub fn compile(category: SignalCategory, terms: &[String]) -> anyhow::Result<Self> {
        if terms.is_empty() {
            anyhow::bail!("keyword set '{}' is empty", category.as_str());
        }

        // Longest-first so multi-word terms win the alternation and show up
        // intact in diagnostics ("supply chain", not "supply").
        let mut sorted: Vec<String> = terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        sorted.dedup();
        if sorted.is_empty() {
            anyhow::bail!("keyword set '{}' is empty after trimming", category.as_str());
        }

        let alternation = sorted
            .iter()
            .map(|t| escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let matcher = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| anyhow::anyhow!("keyword set '{}': {e}", category.as_str()))?;

        Ok(Self {
            category,
            terms: sorted,
            matcher,
        })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Presence/absence of any term, with the first match recorded for
    /// diagnostics.
    pub fn scan(&self, text: &str) -> ClassificationSignal {
        match self.matcher.find(text) {
            Some(m) => ClassificationSignal::hit(self.category, m.as_str()),
            None => ClassificationSignal::miss(self.category),
        }
    }
}

/// A category-tagged set of compiled regex patterns. First matching pattern
/// wins; the pattern source (not the matched query text) is recorded, so
/// unsafe query content is never propagated through signals.
pub struct PatternSet {
    category: SignalCategory,
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn compile(category: SignalCategory, exprs: &[String]) -> anyhow::Result<Self> {
        if exprs.is_empty() {
            anyhow::bail!("pattern set '{}' is empty", category.as_str());
        }

        let mut patterns = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let re = RegexBuilder::new(expr)
                .case_insensitive(true)
                .build()
                .map_err(|e| {
                    anyhow::anyhow!("pattern set '{}': bad pattern {expr:?}: {e}", category.as_str())
                })?;
            patterns.push(re);
        }

        Ok(Self { category, patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn scan(&self, text: &str) -> ClassificationSignal {
        for re in &self.patterns {
            if re.is_match(text) {
                return ClassificationSignal::hit(self.category, re.as_str());
            }
        }
        ClassificationSignal::miss(self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn keyword_match_is_whole_word() {
        let set = KeywordSet::compile(
            SignalCategory::Manufacturing,
            &terms(&["shift", "supply chain"]),
        )
        .unwrap();

        assert!(set.scan("compare the morning shift").matched);
        // "shifts" is not the term "shift"
        assert!(!set.scan("compare the morning shifts").matched);
        assert!(set.scan("our SUPPLY CHAIN data").matched);
    }

    #[test]
    fn keyword_diagnostics_report_first_match() {
        let set =
            KeywordSet::compile(SignalCategory::Analysis, &terms(&["trend", "chart"])).unwrap();
        let sig = set.scan("chart the trend");
        assert!(sig.matched);
        assert_eq!(sig.matched_term.as_deref(), Some("chart"));
    }

    #[test]
    fn pattern_signal_carries_pattern_source_not_query_text() {
        let set = PatternSet::compile(
            SignalCategory::Unsafe,
            &terms(&[r"\b(weapon|bomb)\b"]),
        )
        .unwrap();
        let sig = set.scan("how to build a weapon at home");
        assert!(sig.matched);
        assert_eq!(sig.matched_term.as_deref(), Some(r"\b(weapon|bomb)\b"));
    }

    #[test]
    fn empty_sets_are_rejected_at_compile() {
        assert!(KeywordSet::compile(SignalCategory::Manufacturing, &[]).is_err());
        assert!(PatternSet::compile(SignalCategory::Unsafe, &[]).is_err());
        assert!(PatternSet::compile(SignalCategory::Unsafe, &terms(&["("])).is_err());
    }
}
