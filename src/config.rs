//! Configuration management
//!
//! Settings are layered: `storygen.toml` in the working directory, then
//! environment variables, then CLI flags (applied by the command handlers).
//! The API key is environment-only so it never lands in a committed file.
//!
//! # Environment Variables
//!
//! - `LLM_PROVIDER`: Provider selection (openai|gemini) - default: "openai"
//! - `LLM_MODEL`: Model name - default: "gpt-4.1-mini"
//! - `LLM_API_KEY`: API key for the selected provider - **required**

use crate::llm::{BackendError, GenAIClient, LLMClient};
use crate::model::Framework;
use genai::adapter::AdapterKind;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "storygen.toml";

const DEFAULT_INPUT_DIRECTORY: &str = "./src/components";
const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid provider: {0}. Valid options: openai, gemini")]
    InvalidProvider(String),

    #[error("Invalid framework: {0}. Valid options: react, angular, vue")]
    InvalidFramework(String),

    #[error("llm_model is empty. Set LLM_MODEL or llm_model in storygen.toml")]
    MissingModel,

    #[error("LLM_API_KEY is missing for {provider} provider. Set the LLM_API_KEY environment variable")]
    MissingApiKey { provider: LlmProvider },

    #[error("Input directory does not exist: {0}")]
    MissingInputDirectory(PathBuf),

    #[error("Failed to read {path}: {error}")]
    ReadError { path: PathBuf, error: String },

    #[error("Failed to parse {path}: {error}")]
    ParseError { path: PathBuf, error: String },

    #[error("Backend initialization failed: {0}")]
    BackendInitError(#[from] BackendError),
}

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Gemini,
}

impl LlmProvider {
    pub fn adapter_kind(&self) -> AdapterKind {
        match self {
            LlmProvider::OpenAi => AdapterKind::OpenAI,
            LlmProvider::Gemini => AdapterKind::Gemini,
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAi => write!(f, "openai"),
            LlmProvider::Gemini => write!(f, "gemini"),
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(LlmProvider::OpenAi),
            "gemini" => Ok(LlmProvider::Gemini),
            other => Err(ConfigError::InvalidProvider(other.to_string())),
        }
    }
}

/// File-level settings, all optional. Missing fields fall through to
/// environment variables and built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    input_directory: Option<String>,
    framework: Option<String>,
    llm_provider: Option<String>,
    llm_model: Option<String>,
    use_git_diff: Option<bool>,
    request_timeout_secs: Option<u64>,
}

/// Resolved configuration for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory scanned for component files
    pub input_directory: PathBuf,
    /// Target framework; `None` means auto-detect from the project
    pub framework: Option<Framework>,
    /// LLM provider
    pub llm_provider: LlmProvider,
    /// Model name
    pub llm_model: String,
    /// API key for the provider
    pub llm_api_key: Option<String>,
    /// Restrict the run to git-staged files
    pub use_git_diff: bool,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_directory: PathBuf::from(DEFAULT_INPUT_DIRECTORY),
            framework: None,
            llm_provider: LlmProvider::OpenAi,
            llm_model: DEFAULT_MODEL.to_string(),
            llm_api_key: None,
            use_git_diff: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl GeneratorConfig {
    /// Loads configuration from `storygen.toml` in `dir` (when present)
    /// layered over environment variables and defaults.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let text =
                std::fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    error: e.to_string(),
                })?;
            let file: FileConfig =
                toml::from_str(&text).map_err(|e| ConfigError::ParseError {
                    path: config_path.clone(),
                    error: e.to_string(),
                })?;
            config.apply_file(file)?;
            tracing::debug!(path = %config_path.display(), "Loaded configuration file");
        }

        config.apply_env()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) -> Result<(), ConfigError> {
        if let Some(input) = file.input_directory {
            self.input_directory = PathBuf::from(input);
        }
        if let Some(framework) = file.framework {
            self.framework = Some(
                framework
                    .parse()
                    .map_err(|_| ConfigError::InvalidFramework(framework))?,
            );
        }
        if let Some(provider) = file.llm_provider {
            self.llm_provider = provider.parse()?;
        }
        if let Some(model) = file.llm_model {
            self.llm_model = model;
        }
        if let Some(use_git_diff) = file.use_git_diff {
            self.use_git_diff = use_git_diff;
        }
        if let Some(timeout) = file.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        Ok(())
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(provider) = env::var("LLM_PROVIDER") {
            match provider.parse() {
                Ok(parsed) => self.llm_provider = parsed,
                Err(_) => {
                    tracing::warn!(
                        provider = %provider,
                        "Unknown LLM_PROVIDER value, falling back to openai"
                    );
                    self.llm_provider = LlmProvider::OpenAi;
                }
            }
        }
        if let Ok(model) = env::var("LLM_MODEL") {
            self.llm_model = model;
        }
        if let Ok(key) = env::var("LLM_API_KEY") {
            if !key.is_empty() {
                self.llm_api_key = Some(key);
            }
        }
        Ok(())
    }

    /// Checks that everything a run needs is present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm_api_key.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::MissingApiKey {
                provider: self.llm_provider,
            });
        }
        if self.llm_model.trim().is_empty() {
            return Err(ConfigError::MissingModel);
        }
        if !self.input_directory.exists() {
            return Err(ConfigError::MissingInputDirectory(
                self.input_directory.clone(),
            ));
        }
        Ok(())
    }

    /// Builds the production LLM client from this configuration.
    pub fn create_client(&self) -> Result<Arc<dyn LLMClient>, ConfigError> {
        let api_key = self
            .llm_api_key
            .clone()
            .ok_or(ConfigError::MissingApiKey {
                provider: self.llm_provider,
            })?;
        let client = GenAIClient::new(
            self.llm_provider.adapter_kind(),
            self.llm_model.clone(),
            api_key,
            Duration::from_secs(self.request_timeout_secs),
        )?;
        Ok(Arc::new(client))
    }
}

/// Template written by the `init-config` command.
pub const CONFIG_TEMPLATE: &str = r#"# storygen configuration
# Settings here are overridden by LLM_PROVIDER / LLM_MODEL environment
# variables. The API key is read from LLM_API_KEY only.

# Directory scanned for component files
input_directory = "./src/components"

# Target framework: "react", "angular" or "vue".
# Omit to auto-detect from package.json and source files.
# framework = "react"

# LLM provider: "openai" or "gemini"
llm_provider = "openai"
llm_model = "gpt-4.1-mini"

# Only process files staged in git
use_git_diff = false

# Per-request timeout in seconds
request_timeout_secs = 60
"#;

/// Writes the configuration template into `dir`. Refuses to overwrite an
/// existing file.
pub fn write_config_template(dir: &Path) -> Result<PathBuf, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(ConfigError::ReadError {
            path,
            error: "configuration file already exists".to_string(),
        });
    }
    std::fs::write(&path, CONFIG_TEMPLATE).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        error: e.to_string(),
    })?;
    Ok(path)
}
