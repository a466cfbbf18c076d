//! Web search tool backed by the DuckDuckGo HTML endpoint.

use std::collections::HashSet;
use std::time::Duration;

use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum SearchToolError {
    #[error("search request failed with HTTP {0}")]
    Http(u16),
    #[error("rate limited by search provider")]
    RateLimited,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Searches the web and returns a plain-text digest of result links.
///
/// DuckDuckGo has no free JSON API, so this scrapes the HTML endpoint and
/// pulls result URLs out of the `uddg=` redirect parameter.
#[derive(Clone)]
pub struct WebSearchTool {
    client: reqwest::Client,
    max_results: usize,
}

impl WebSearchTool {
    pub fn new(max_results: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            max_results,
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<String>, SearchToolError> {
        info!(query = %query, "performing web search");

        let url = format!("{SEARCH_ENDPOINT}?q={}", urlencoding::encode(query));
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchToolError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(SearchToolError::Http(response.status().as_u16()));
        }

        let body = response.text().await?;
        let urls = extract_result_urls(&body, self.max_results);

        if urls.is_empty() {
            warn!(query = %query, "no search results found");
        } else {
            debug!(query = %query, count = urls.len(), "search completed");
        }

        Ok(urls)
    }
}

/// Pull redirect targets out of `uddg=`-encoded result links, deduplicated
/// in page order.
fn extract_result_urls(html: &str, max_results: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();

    for segment in html.split("uddg=").skip(1) {
        if urls.len() >= max_results {
            break;
        }

        let Some(end) = segment.find(['&', '"', '\'']) else {
            continue;
        };
        let Ok(decoded) = urlencoding::decode(&segment[..end]) else {
            continue;
        };

        let url = decoded.into_owned();
        if url.starts_with("http") && !url.contains("duckduckgo.com") && seen.insert(url.clone()) {
            urls.push(url);
        }
    }

    urls
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchArgs {
    pub query: String,
}

impl Tool for WebSearchTool {
    const NAME: &'static str = "web_search";

    type Args = SearchArgs;
    type Output = String;
    type Error = SearchToolError;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web for current events, real-time news, and general information."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query to look up"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let urls = self.search(&args.query).await?;

        if urls.is_empty() {
            return Ok(format!("No results found for: {}", args.query));
        }

        let listing = urls
            .iter()
            .enumerate()
            .map(|(i, url)| format!("{}. {url}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(format!("Search results for \"{}\":\n{listing}", args.query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_and_deduplicates_redirect_urls() {
        let html = concat!(
            r#"<a href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa&amp;rut=x">"#,
            r#"<a href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fa&amp;rut=y">"#,
            r#"<a href="//duckduckgo.com/l/?uddg=https%3A%2F%2Frust-lang.org%2F&amp;rut=z">"#,
        );
        let urls = extract_result_urls(html, 5);
        assert_eq!(
            urls,
            vec!["https://example.com/a", "https://rust-lang.org/"]
        );
    }

    #[test]
    fn respects_result_cap() {
        let html = concat!(
            r#"uddg=https%3A%2F%2Fone.example%2F&"#,
            r#"uddg=https%3A%2F%2Ftwo.example%2F&"#,
            r#"uddg=https%3A%2F%2Fthree.example%2F&"#,
        );
        let urls = extract_result_urls(html, 2);
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn ignores_internal_links() {
        let html = r#"uddg=https%3A%2F%2Fduckduckgo.com%2Fabout&"#;
        assert!(extract_result_urls(html, 5).is_empty());
    }
}
