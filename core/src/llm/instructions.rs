//! Structured analysis instructions produced by the LLM pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON contract the model is prompted to fill in for an admitted query.
/// Downstream dataset analysis consumes this; the gate never sees it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AnalysisInstructions {
    #[serde(default)]
    pub analysis_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_query: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_metric: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping_column: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<u32>,

    #[serde(default)]
    pub metrics: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,

    #[serde(default)]
    pub calculations: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insights_focus: Option<String>,
}

/// Extract instructions from a raw model reply. The model is asked for pure
/// JSON but often wraps it in prose or code fences, so this takes the
/// outermost brace span; if no parseable JSON is present, falls back to
/// keyword heuristics over the reply text.
pub fn parse_reply(reply: &str) -> AnalysisInstructions {
    if let (Some(start), Some(end)) = (reply.find('{'), reply.rfind('}')) {
        if end > start {
            if let Ok(parsed) = serde_json::from_str::<AnalysisInstructions>(&reply[start..=end]) {
                return parsed;
            }
        }
    }
    fallback_from_text(reply)
}

/// Keyword-heuristic instructions for replies with no usable JSON.
fn fallback_from_text(text: &str) -> AnalysisInstructions {
    let lower = text.to_lowercase();

    let analysis_type = if ["compare", "comparison", "vs", "versus"]
        .iter()
        .any(|w| lower.contains(w))
    {
        "comparison"
    } else if ["summary", "overview", "total"].iter().any(|w| lower.contains(w)) {
        "summary"
    } else if ["correlation", "relationship", "related"]
        .iter()
        .any(|w| lower.contains(w))
    {
        "correlation"
    } else {
        "trend_analysis"
    };

    let chart_type = if ["bar", "column"].iter().any(|w| lower.contains(w)) {
        "bar"
    } else if ["scatter", "correlation"].iter().any(|w| lower.contains(w)) {
        "scatter"
    } else if ["pie", "percentage", "proportion"].iter().any(|w| lower.contains(w)) {
        "pie"
    } else {
        "line"
    };

    AnalysisInstructions {
        analysis_type: analysis_type.to_string(),
        chart_type: Some(chart_type.to_string()),
        calculations: vec!["sum".to_string(), "mean".to_string()],
        title: Some("Data Analysis".to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_embedded_in_prose() {
        let reply = r#"Here is the analysis plan:
```json
{"analysis_type": "ranking", "primary_metric": "defect_rate", "top_n": 5,
 "metrics": ["defect_rate"], "chart_type": "bar", "title": "Top defect rates"}
```
Let me know if you need anything else."#;

        let parsed = parse_reply(reply);
        assert_eq!(parsed.analysis_type, "ranking");
        assert_eq!(parsed.primary_metric.as_deref(), Some("defect_rate"));
        assert_eq!(parsed.top_n, Some(5));
        assert_eq!(parsed.chart_type.as_deref(), Some("bar"));
    }

    #[test]
    fn tolerates_missing_fields() {
        let parsed = parse_reply(r#"{"analysis_type": "summary"}"#);
        assert_eq!(parsed.analysis_type, "summary");
        assert!(parsed.metrics.is_empty());
        assert!(parsed.title.is_none());
    }

    #[test]
    fn falls_back_to_text_heuristics() {
        let parsed = parse_reply("I would compare the shifts in a bar layout.");
        assert_eq!(parsed.analysis_type, "comparison");
        assert_eq!(parsed.chart_type.as_deref(), Some("bar"));
    }

    #[test]
    fn fallback_default_is_trend_line() {
        let parsed = parse_reply("no structure here at all");
        assert_eq!(parsed.analysis_type, "trend_analysis");
        assert_eq!(parsed.chart_type.as_deref(), Some("line"));
    }
}
