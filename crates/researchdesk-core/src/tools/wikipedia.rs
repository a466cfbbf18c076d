//! Wikipedia lookup tool backed by the MediaWiki query API.

use std::collections::HashMap;
use std::time::Duration;

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const API_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

#[derive(Debug, Error)]
pub enum WikipediaToolError {
    #[error("wikipedia request failed with HTTP {0}")]
    Http(u16),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Returns up to `top_k` article extracts for a query, each truncated to
/// `chars_max` characters and concatenated into one string.
#[derive(Clone)]
pub struct WikipediaTool {
    client: reqwest::Client,
    top_k: usize,
    chars_max: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    pages: HashMap<String, Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    extract: Option<String>,
    /// Search rank supplied by the generator; pages arrive keyed by page id.
    index: Option<i64>,
}

impl WikipediaTool {
    pub fn new(top_k: usize, chars_max: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            top_k,
            chars_max,
        }
    }

    pub async fn lookup(&self, query: &str) -> Result<String, WikipediaToolError> {
        info!(query = %query, "querying wikipedia");

        let limit = self.top_k.to_string();
        let response = self
            .client
            .get(API_ENDPOINT)
            .timeout(Duration::from_secs(10))
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("explaintext", "1"),
                ("generator", "search"),
                ("gsrsearch", query),
                ("gsrlimit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WikipediaToolError::Http(response.status().as_u16()));
        }

        let payload: QueryResponse = response.json().await?;
        let Some(pages) = payload.query.map(|q| q.pages) else {
            debug!(query = %query, "wikipedia returned no pages");
            return Ok(format!("No Wikipedia results found for: {query}"));
        };

        let mut ranked: Vec<Page> = pages.into_values().collect();
        ranked.sort_by_key(|page| page.index.unwrap_or(i64::MAX));

        let summaries: Vec<String> = ranked
            .into_iter()
            .take(self.top_k)
            .filter_map(|page| {
                let extract = page.extract?;
                let truncated: String = extract.chars().take(self.chars_max).collect();
                Some(format!("Page: {}\nSummary: {truncated}", page.title))
            })
            .collect();

        if summaries.is_empty() {
            return Ok(format!("No Wikipedia results found for: {query}"));
        }

        debug!(query = %query, pages = summaries.len(), "wikipedia lookup completed");
        Ok(summaries.join("\n\n"))
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WikipediaArgs {
    pub query: String,
}

impl Tool for WikipediaTool {
    const NAME: &'static str = "wikipedia";

    type Args = WikipediaArgs;
    type Output = String;
    type Error = WikipediaToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search Wikipedia for technical definitions and historical context."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The topic to look up on Wikipedia"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        self.lookup(&args.query).await
    }
}
