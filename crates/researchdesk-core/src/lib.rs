//! ResearchDesk core: answer schema, agent tools, agent invocation, and
//! report rendering.
//!
//! This crate provides the research flow shared by the HTTP and terminal
//! front-ends: build a schema-constrained system prompt, run one
//! tool-calling episode against the hosted model, pull the structured
//! answer out of the final message, and render it as a text report.

mod agent;
mod config;
mod error;
mod extract;
pub mod report;
mod schema;
mod service;
pub mod tools;

pub use agent::ResearchAgent;
pub use config::{Config, LlmConfig, SecretValue, ToolsConfig, require_env};
pub use error::ResearchDeskError;
pub use extract::extract_answer;
pub use schema::{ResearchAnswer, format_instructions};
pub use service::{AgentRuntime, ResearchService};
