use std::path::PathBuf;

use thiserror::Error;

/// Core error type for ResearchDesk.
#[derive(Debug, Error)]
pub enum ResearchDeskError {
    #[error("configuration error: {0}")]
    InvalidConfiguration(String),
    #[error("missing environment variable: {0}")]
    MissingSecret(String),
    #[error("I/O error while reading {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("agent invocation failed: {0}")]
    Agent(String),
    #[error("no JSON object in the agent output matched the answer schema")]
    Extraction {
        /// Raw final-message content, kept so failure reports can expose it.
        content: String,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResearchDeskError {
    pub fn config_io(path: PathBuf, source: std::io::Error) -> Self {
        Self::ConfigIo { path, source }
    }
}
