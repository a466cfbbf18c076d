//! Deterministic text rendering of a validated answer.

use chrono::Local;

use crate::schema::ResearchAnswer;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render an answer into the multi-line report template, stamped with the
/// current local time.
pub fn render(answer: &ResearchAnswer) -> String {
    render_at(answer, &Local::now().format(TIMESTAMP_FORMAT).to_string())
}

/// Template body with an explicit timestamp, kept separate so tests can pin
/// the header.
pub fn render_at(answer: &ResearchAnswer, timestamp: &str) -> String {
    let mut lines = vec![
        format!("--- Research Output ---\nTimestamp: {timestamp}\n"),
        format!("{} Overview\n", answer.topic),
        format!("{}\n", answer.summary),
        "\nKey Findings:".to_string(),
    ];
    lines.extend(answer.findings.iter().map(|f| format!(" - {f}")));
    lines.push("\nDemographics/Data:".to_string());
    lines.extend(answer.demographics.iter().map(|d| format!(" - {d}")));
    lines.push("\nSources:".to_string());
    lines.extend(answer.sources.iter().map(|s| format!(" - {s}")));
    lines.join("\n")
}

/// Report body shown when the agent invocation itself fails.
pub fn render_agent_error(message: &str) -> String {
    format!("--- Error ---\n{message}")
}

/// Report body shown when no JSON candidate validated; exposes the raw
/// content for debugging.
pub fn render_parse_error(content: &str) -> String {
    format!("Parse Error. Content: {content}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_answer() -> ResearchAnswer {
        ResearchAnswer {
            topic: "Quantum Computing".to_string(),
            summary: "Qubits, gates, and error correction.".to_string(),
            findings: vec!["a".to_string()],
            demographics: vec!["b".to_string()],
            sources: vec!["c".to_string()],
        }
    }

    #[test]
    fn template_matches_expected_layout() {
        let report = render_at(&sample_answer(), "2024-01-02 03:04:05");
        let expected = concat!(
            "--- Research Output ---\nTimestamp: 2024-01-02 03:04:05\n\n",
            "Quantum Computing Overview\n\n",
            "Qubits, gates, and error correction.\n\n",
            "\nKey Findings:\n - a\n",
            "\nDemographics/Data:\n - b\n",
            "\nSources:\n - c",
        );
        assert_eq!(report, expected);
    }

    #[test]
    fn render_stamps_current_time_header() {
        let report = render(&sample_answer());
        assert!(report.starts_with("--- Research Output ---\nTimestamp: "));
        assert!(report.contains("Quantum Computing Overview"));
    }

    #[test]
    fn empty_lists_render_bare_headings() {
        let answer = ResearchAnswer {
            findings: Vec::new(),
            demographics: Vec::new(),
            sources: Vec::new(),
            ..sample_answer()
        };
        let report = render_at(&answer, "2024-01-02 03:04:05");
        assert!(report.contains("\nKey Findings:\n\nDemographics/Data:"));
        assert!(report.ends_with("Sources:"));
    }

    #[test]
    fn error_report_bodies() {
        assert_eq!(
            render_agent_error("connection refused"),
            "--- Error ---\nconnection refused"
        );
        assert_eq!(
            render_parse_error("no json here"),
            "Parse Error. Content: no json here"
        );
    }
}
