//! Local file-save tool: appends timestamped research blocks to a flat file.

use std::convert::Infallible;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rig::completion::ToolDefinition;
use rig::tool::Tool;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::report::TIMESTAMP_FORMAT;

/// Append one timestamped block to `path`, creating parent directories as
/// needed. Blocks share the fixed header pattern so the output file stays
/// grep-able even though it is not machine-parseable.
pub fn append_research_block(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }

    let timestamp = Local::now().format(TIMESTAMP_FORMAT);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file {}", path.display()))?;
    write!(
        file,
        "--- Research Output ---\nTimestamp: {timestamp}\n\n{data}\n\n"
    )
    .with_context(|| format!("failed to append to {}", path.display()))?;

    Ok(())
}

/// Saves final research results into a local text file.
///
/// Never fails past its own boundary: the payload returned to the model is
/// either a success message or a description of the problem, so the agent
/// can reason about the failure instead of aborting the run.
#[derive(Clone)]
pub struct SaveToFileTool {
    default_path: PathBuf,
}

impl SaveToFileTool {
    pub fn new(default_path: PathBuf) -> Self {
        Self { default_path }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SaveArgs {
    pub data: String,
    #[serde(default)]
    pub filename: Option<String>,
}

impl Tool for SaveToFileTool {
    const NAME: &'static str = "save_to_file";

    type Args = SaveArgs;
    type Output = String;
    type Error = Infallible;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Saves the final research results into a local text file for storage."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "data": {
                        "type": "string",
                        "description": "The research text to save"
                    },
                    "filename": {
                        "type": "string",
                        "description": "Target file path; defaults to the configured output file"
                    }
                },
                "required": ["data"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let path = args
            .filename
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_path.clone());

        match append_research_block(&path, &args.data) {
            Ok(()) => {
                info!(path = %path.display(), bytes = args.data.len(), "saved research output");
                Ok(format!("Successfully saved to {}", path.display()))
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "file save failed");
                Ok(format!("Error saving file: {err}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn appends_two_blocks_for_same_filename() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("research_output.txt");
        let tool = SaveToFileTool::new(path.clone());

        let first = tool
            .call(SaveArgs {
                data: "first block".into(),
                filename: None,
            })
            .await
            .unwrap();
        assert!(first.starts_with("Successfully saved to"));
        assert!(path.exists());
        assert!(fs::metadata(&path).unwrap().len() > 0);

        tool.call(SaveArgs {
            data: "second block".into(),
            filename: None,
        })
        .await
        .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("--- Research Output ---").count(), 2);
        assert!(contents.contains("first block"));
        assert!(contents.contains("second block"));
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let temp = TempDir::new().expect("temp dir");
        let nested = temp.path().join("deep/nested/output.txt");
        let tool = SaveToFileTool::new(temp.path().join("unused.txt"));

        let message = tool
            .call(SaveArgs {
                data: "payload".into(),
                filename: Some(nested.to_string_lossy().into_owned()),
            })
            .await
            .unwrap();

        assert!(message.starts_with("Successfully saved to"));
        assert!(nested.exists());
    }

    #[tokio::test]
    async fn reports_save_failure_as_string() {
        let temp = TempDir::new().expect("temp dir");
        // A directory target cannot be opened for append.
        let tool = SaveToFileTool::new(temp.path().to_path_buf());

        let message = tool
            .call(SaveArgs {
                data: "payload".into(),
                filename: None,
            })
            .await
            .unwrap();

        assert!(message.starts_with("Error saving file:"));
    }

    #[test]
    fn block_header_matches_fixed_pattern() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("out.txt");
        append_research_block(&path, "data").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("--- Research Output ---\nTimestamp: "));
        assert!(contents.ends_with("\n\ndata\n\n"));
    }
}
