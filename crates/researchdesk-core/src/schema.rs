use serde::{Deserialize, Serialize};

/// Structured answer the agent must emit as its final response.
///
/// A candidate JSON object either deserializes into every field or is
/// rejected outright; partially-filled answers never leave this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchAnswer {
    pub topic: String,
    /// A deep technical summary.
    pub summary: String,
    /// Detailed bullet points.
    pub findings: Vec<String>,
    /// Statistical or demographic data.
    pub demographics: Vec<String>,
    /// List of URLs or sources used.
    pub sources: Vec<String>,
}

impl ResearchAnswer {
    /// Interpret a candidate string as JSON and validate it against the
    /// answer shape.
    pub fn parse(candidate: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(candidate)
    }
}

/// Render the answer schema as prompt text instructing the model how to
/// shape its final response. Embedded verbatim into the system prompt.
pub fn format_instructions() -> String {
    let schema = serde_json::json!({
        "type": "object",
        "properties": {
            "topic": {
                "type": "string",
                "description": "The researched topic"
            },
            "summary": {
                "type": "string",
                "description": "A deep technical summary"
            },
            "findings": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Detailed bullet points"
            },
            "demographics": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Statistical or demographic data"
            },
            "sources": {
                "type": "array",
                "items": { "type": "string" },
                "description": "List of URLs or sources used"
            }
        },
        "required": ["topic", "summary", "findings", "demographics", "sources"]
    });

    format!(
        "The output should be a single JSON object conforming to the JSON schema below. \
         Do not wrap it in markdown fences or add commentary around it.\n\n{}",
        serde_json::to_string_pretty(&schema).expect("schema literal always serializes")
    )
}
