//! Research flow: invoke the agent, extract the answer, render the report.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, warn};

use crate::agent::ResearchAgent;
use crate::config::Config;
use crate::{ResearchDeskError, extract, report};

/// One reasoning-and-tool-use episode. This is the seam front-ends mock in
/// tests; the production implementation is [`ResearchAgent`].
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Run the agent to completion and return the final message content.
    async fn final_answer(&self, query: &str) -> Result<String, ResearchDeskError>;
}

/// Ties agent invocation, response extraction, and report rendering
/// together. Every failure path resolves to a user-visible report string;
/// callers never see an error.
#[derive(Clone)]
pub struct ResearchService {
    runtime: Arc<dyn AgentRuntime>,
}

impl ResearchService {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self { runtime }
    }

    pub fn from_config(config: Config) -> Self {
        Self::new(Arc::new(ResearchAgent::new(config)))
    }

    #[instrument(skip_all, fields(query = %query))]
    pub async fn run(&self, query: &str) -> String {
        let content = match self.runtime.final_answer(query).await {
            Ok(content) => content,
            Err(err) => {
                warn!(error = %err, "agent invocation failed");
                return report::render_agent_error(&err.to_string());
            }
        };

        match extract::extract_answer(&content) {
            Ok(answer) => report::render(&answer),
            Err(ResearchDeskError::Extraction { content }) => {
                warn!("agent output contained no valid answer object");
                report::render_parse_error(&content)
            }
            Err(err) => report::render_agent_error(&err.to_string()),
        }
    }
}
