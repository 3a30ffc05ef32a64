//! Prompt construction for the analysis model.

/// System prompt sent with every admitted query. Scope enforcement happens in
/// the gate before this prompt is ever built; the prompt restates the scope so
/// the model stays on-topic in its own wording.
pub const SYSTEM_PROMPT: &str = "\
You are a manufacturing data analysis assistant. You turn natural-language \
questions about production, quality, efficiency, equipment, and operational \
data into structured analysis instructions.

Respond with a JSON object using exactly this structure:
{
    \"analysis_type\": \"ranking|trend_analysis|comparison|summary|correlation|distribution\",
    \"specific_query\": \"Restate what the user specifically wants to know\",
    \"filters\": {\"date_range\": {\"start\": null, \"end\": null}, \"categories\": {}},
    \"primary_metric\": \"the main metric to analyze (use actual column name)\",
    \"grouping_column\": \"column to group by (use actual column name)\",
    \"sort_by\": \"column to sort results by (use actual column name)\",
    \"sort_order\": \"desc|asc\",
    \"top_n\": 10,
    \"metrics\": [\"list of relevant columns to show\"],
    \"chart_type\": \"bar|line|scatter|pie|heatmap|none\",
    \"calculations\": [\"sum|mean|max|min|count\"],
    \"title\": \"Descriptive title for the specific analysis\",
    \"insights_focus\": \"What specific insights to highlight in results\"
}

Chart decision rules:
- \"none\" when the user asks for a summary, overview, or general information
- \"line\" for trends over time
- \"bar\" for comparisons and rankings
- \"scatter\" for correlations
- \"pie\" for proportions and distributions
- \"heatmap\" for complex relationships

When data context is provided, use the actual column names in your response.";

/// Assemble the full prompt: system prompt, optional dataset context, then the
/// untouched user query.
pub fn build_prompt(query: &str, data_context: Option<&str>) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT);

    if let Some(ctx) = data_context {
        let ctx = ctx.trim();
        if !ctx.is_empty() {
            prompt.push_str("\n\nAvailable data context:\n");
            prompt.push_str(ctx);
        }
    }

    prompt.push_str("\n\nUser Query: ");
    prompt.push_str(query);
    prompt.push_str(
        "\n\nAnalyze this query and provide structured JSON instructions for data filtering and visualization.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_forwarded_verbatim() {
        let q = "Compare defect rates between morning and evening shifts";
        let p = build_prompt(q, None);
        assert!(p.contains(&format!("User Query: {q}")));
    }

    #[test]
    fn context_is_included_when_present() {
        let p = build_prompt("show trends", Some("columns: date, line, output"));
        assert!(p.contains("Available data context:"));
        assert!(p.contains("columns: date, line, output"));

        let without = build_prompt("show trends", Some("   "));
        assert!(!without.contains("Available data context:"));
    }
}
