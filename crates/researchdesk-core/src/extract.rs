//! Best-effort extraction of the structured answer from free-form agent
//! output.
//!
//! Agents often echo tool-call JSON or intermediate reasoning before the
//! true final answer, so candidates are tried from last to first: the last
//! well-formed JSON object is the best guess at the intended output.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::schema::ResearchAnswer;
use crate::ResearchDeskError;

/// Brace-delimited, non-greedy, multi-line candidate pattern. Does not
/// handle nested objects; an answer containing a nested `{}` splits into
/// fragments that fail validation and fall through to the parse-error path.
static JSON_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*?\}").expect("invalid candidate regex"));

/// Scan the agent's final-message content for the structured answer.
///
/// Returns the last brace-delimited substring that validates against the
/// answer schema, or an extraction error carrying the raw content when no
/// candidate validates (including content with no braces at all).
pub fn extract_answer(content: &str) -> Result<ResearchAnswer, ResearchDeskError> {
    let candidates: Vec<&str> = JSON_CANDIDATE
        .find_iter(content)
        .map(|m| m.as_str())
        .collect();

    debug!(candidates = candidates.len(), "scanning agent output");

    for candidate in candidates.iter().rev() {
        match ResearchAnswer::parse(candidate) {
            Ok(answer) => return Ok(answer),
            Err(err) => debug!(error = %err, "candidate rejected"),
        }
    }

    Err(ResearchDeskError::Extraction {
        content: content.to_string(),
    })
}
