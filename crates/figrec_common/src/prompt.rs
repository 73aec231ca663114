//! Prompt composition for the recommendation call.
//!
//! The output-schema directive here is advisory to the model; the extractor
//! owns correctness and tolerates replies that stray from it.

/// System message sent with every recommendation request.
pub const SYSTEM_PROMPT: &str = "You are a data visualization assistant that \
recommends catalog modules matching a user's need. Analyze the query carefully \
and recommend only modules from the provided catalog.";

/// Build the user message: task directive, the literal query, the full
/// catalog context, and the required reply shape.
pub fn compose(query: &str, context: &str) -> String {
    format!(
        r#"From the catalog modules provided below, recommend the 3-5 most relevant modules for the user's query.

User query: {query}

Available modules:
{context}
Analyze the user's need, recommend the most relevant modules, and explain each choice.

Reply in exactly this JSON format:
{{
  "recommendations": [
    {{
      "module": "module name",
      "score": 0.95,
      "reason": "why this module fits"
    }}
  ],
  "explanation": "overall reasoning"
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_query_and_context() {
        let prompt = compose("survival curves by subgroup", "Module: KM\n");
        assert!(prompt.contains("User query: survival curves by subgroup"));
        assert!(prompt.contains("Module: KM"));
    }

    #[test]
    fn prompt_carries_the_schema_directive() {
        let prompt = compose("q", "ctx");
        assert!(prompt.contains("\"recommendations\""));
        assert!(prompt.contains("\"module\""));
        assert!(prompt.contains("\"score\""));
        assert!(prompt.contains("\"reason\""));
        assert!(prompt.contains("\"explanation\""));
    }
}
