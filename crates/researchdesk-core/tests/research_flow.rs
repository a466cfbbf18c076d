use std::sync::Arc;

use async_trait::async_trait;
use researchdesk_core::{
    AgentRuntime, ResearchAnswer, ResearchDeskError, ResearchService, extract_answer, report,
};

struct ScriptedRuntime {
    content: String,
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    async fn final_answer(&self, _query: &str) -> Result<String, ResearchDeskError> {
        Ok(self.content.clone())
    }
}

const FINAL_ANSWER: &str = r#"{"topic":"Quantum Computing","summary":"Qubits and error correction.","findings":["a"],"demographics":["b"],"sources":["c"]}"#;

#[tokio::test]
async fn full_flow_picks_last_valid_object_and_renders_report() {
    let content = format!("Intro text {{\"bad\":1}} ... {FINAL_ANSWER}");
    let service = ResearchService::new(Arc::new(ScriptedRuntime { content }));

    let body = service.run("quantum computing").await;

    assert!(body.starts_with("--- Research Output ---\nTimestamp: "));
    assert!(body.contains("Quantum Computing Overview"));
    assert!(body.contains("Key Findings:\n - a"));
    assert!(body.contains("Demographics/Data:\n - b"));
    assert!(body.contains("Sources:\n - c"));
}

#[tokio::test]
async fn full_flow_reports_parse_error_verbatim() {
    let content = "model rambled with no JSON".to_string();
    let service = ResearchService::new(Arc::new(ScriptedRuntime {
        content: content.clone(),
    }));

    let body = service.run("anything").await;
    assert_eq!(body, format!("Parse Error. Content: {content}"));
}

#[test]
fn extraction_prefers_last_validating_candidate() {
    let content = format!(
        "{} middle {{\"noise\":true}} {}",
        FINAL_ANSWER.replace("Quantum Computing", "Earlier Topic"),
        FINAL_ANSWER
    );
    let answer = extract_answer(&content).expect("a candidate should validate");
    assert_eq!(answer.topic, "Quantum Computing");
}

#[test]
fn report_template_is_deterministic_for_fixed_timestamp() {
    let answer = ResearchAnswer {
        topic: "Topic".into(),
        summary: "Summary.".into(),
        findings: vec!["f1".into(), "f2".into()],
        demographics: vec!["d1".into()],
        sources: vec!["s1".into()],
    };

    let first = report::render_at(&answer, "2024-06-01 12:00:00");
    let second = report::render_at(&answer, "2024-06-01 12:00:00");
    assert_eq!(first, second);
    assert!(first.contains("Topic Overview"));
    assert!(first.contains(" - f1\n - f2"));
}
