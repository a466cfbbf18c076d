//! One-shot agent invocation against the hosted model.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use rig::client::{CompletionClient, ProviderClient};
use rig::completion::Prompt;
use rig::providers::groq;
use tracing::info;

use crate::ResearchDeskError;
use crate::config::Config;
use crate::schema;
use crate::service::AgentRuntime;
use crate::tools::{SaveToFileTool, WebSearchTool, WikipediaTool};

/// Shared provider client, constructed on first use from `GROQ_API_KEY`.
/// The underlying HTTP client is stateless per call, so one instance serves
/// the whole process and needs no teardown.
static GROQ_CLIENT: Lazy<groq::Client> = Lazy::new(|| groq::Client::from_env());

fn system_prompt() -> String {
    format!(
        "You are an elite research assistant.\n\
         1. Use the available tools to gather data.\n\
         2. NEVER wrap tool calls in XML tags such as <function>.\n\
         3. Your final response must be ONLY a JSON object:\n{}",
        schema::format_instructions()
    )
}

/// Binds the configured model and the full tool set into one agent and runs
/// a single bounded reasoning-and-tool-use episode per query. Tool selection
/// is left to the model.
pub struct ResearchAgent {
    config: Config,
}

impl ResearchAgent {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    async fn invoke(&self, query: &str) -> Result<String, ResearchDeskError> {
        let tools = &self.config.tools;
        let agent = GROQ_CLIENT
            .agent(&self.config.llm.model)
            .preamble(&system_prompt())
            .tool(WebSearchTool::new(tools.max_search_results))
            .tool(WikipediaTool::new(
                tools.wikipedia_top_k,
                tools.wikipedia_chars_max,
            ))
            .tool(SaveToFileTool::new(tools.output_file.clone()))
            .temperature(0.0)
            .build();

        info!(model = %self.config.llm.model, "invoking research agent");

        agent
            .prompt(query)
            .multi_turn(self.config.llm.max_tool_turns)
            .await
            .map_err(|err| ResearchDeskError::Agent(err.to_string()))
    }
}

#[async_trait]
impl AgentRuntime for ResearchAgent {
    async fn final_answer(&self, query: &str) -> Result<String, ResearchDeskError> {
        self.invoke(query).await
    }
}
