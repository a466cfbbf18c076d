use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::ResearchDeskError;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const CONFIG_PATH_ENV: &str = "RESEARCHDESK_CONFIG";

/// Wrapper around sensitive values to reduce accidental logging.
#[derive(Clone)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "***redacted***")
    }
}

/// Require that a given environment variable is set and non-empty.
pub fn require_env(var: &str) -> Result<SecretValue, ResearchDeskError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(SecretValue(value)),
        _ => Err(ResearchDeskError::MissingSecret(var.to_string())),
    }
}

/// Top-level configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Resolve the configured LLM secret value (from environment only).
    pub fn llm_api_key(&self) -> Result<SecretValue, ResearchDeskError> {
        require_env(&self.llm.api_key_env)
    }

    /// Load configuration from a provided path or discoverable defaults.
    ///
    /// Resolution order:
    /// 1. Explicit `path` argument.
    /// 2. `RESEARCHDESK_CONFIG` environment variable.
    /// 3. `config.toml` in the current working directory, falling back to
    ///    built-in defaults when the file does not exist.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ResearchDeskError> {
        let explicit = path.is_some() || env::var(CONFIG_PATH_ENV).is_ok();
        let candidate = resolve_path(path);

        let config = if candidate.exists() || explicit {
            let raw = fs::read_to_string(&candidate)
                .map_err(|err| ResearchDeskError::config_io(candidate.clone(), err))?;
            toml::from_str(&raw)
                .map_err(|err| ResearchDeskError::InvalidConfiguration(err.to_string()))?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ResearchDeskError> {
        if self.llm.api_key_env.trim().is_empty() {
            return Err(ResearchDeskError::InvalidConfiguration(
                "llm.api_key_env must reference an environment variable".into(),
            ));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ResearchDeskError::InvalidConfiguration(
                "llm.model must not be empty".into(),
            ));
        }

        // Ensure the secret exists at load time to discourage inline keys.
        require_env(&self.llm.api_key_env)?;
        Ok(())
    }
}

fn resolve_path(path: Option<PathBuf>) -> PathBuf {
    if let Some(path) = path {
        return path;
    }

    if let Ok(from_env) = env::var(CONFIG_PATH_ENV) {
        if !from_env.trim().is_empty() {
            return PathBuf::from(from_env);
        }
    }

    Path::new(DEFAULT_CONFIG_PATH).to_path_buf()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "LlmConfig::default_model")]
    pub model: String,
    /// Name of the environment variable holding the provider API key. The
    /// Groq client resolves its credentials from `GROQ_API_KEY`, so changing
    /// this only changes which variable startup validation checks.
    #[serde(default = "LlmConfig::default_api_key_env")]
    pub api_key_env: String,
    /// Upper bound on reasoning-and-tool-use turns per query.
    #[serde(default = "LlmConfig::default_max_tool_turns")]
    pub max_tool_turns: usize,
}

impl LlmConfig {
    fn default_model() -> String {
        "llama-3.3-70b-versatile".to_string()
    }

    fn default_api_key_env() -> String {
        "GROQ_API_KEY".to_string()
    }

    const fn default_max_tool_turns() -> usize {
        10
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: Self::default_model(),
            api_key_env: Self::default_api_key_env(),
            max_tool_turns: Self::default_max_tool_turns(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    #[serde(default = "ToolsConfig::default_max_search_results")]
    pub max_search_results: usize,
    #[serde(default = "ToolsConfig::default_wikipedia_top_k")]
    pub wikipedia_top_k: usize,
    #[serde(default = "ToolsConfig::default_wikipedia_chars_max")]
    pub wikipedia_chars_max: usize,
    /// Default target for the file-save tool when the agent omits a filename.
    #[serde(default = "ToolsConfig::default_output_file")]
    pub output_file: PathBuf,
}

impl ToolsConfig {
    const fn default_max_search_results() -> usize {
        5
    }

    const fn default_wikipedia_top_k() -> usize {
        3
    }

    const fn default_wikipedia_chars_max() -> usize {
        4000
    }

    fn default_output_file() -> PathBuf {
        PathBuf::from("research_output.txt")
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_search_results: Self::default_max_search_results(),
            wikipedia_top_k: Self::default_wikipedia_top_k(),
            wikipedia_chars_max: Self::default_wikipedia_chars_max(),
            output_file: Self::default_output_file(),
        }
    }
}
