//! Settings file and the resolved model / summarizer configuration.
//!
//! A settings file is plain JSON where every field is optional:
//!
//! ```json
//! { "model": "gpt-4", "tokenBudget": 3000, "batchSize": 10 }
//! ```
//!
//! Values left out fall back to the defaults below; CLI flags are merged on top.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::summarizer::SummarizerConfig;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;
pub const DEFAULT_MAX_TOKENS: u32 = 750;
pub const DEFAULT_TIMEOUT_SECS: u64 = 180;
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Everything the HTTP client needs
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: Some(DEFAULT_MAX_TOKENS),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    /// Tokenizer model or encoding name; defaults to the model
    pub tokenizer: Option<String>,
    pub token_budget: Option<usize>,
    pub sub_chunk_tokens: Option<usize>,
    pub batch_size: Option<usize>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Settings = serde_json::from_str(&content).map_err(|e| {
            PipelineError::config(format!("invalid settings file {}: {}", path.display(), e))
        })?;

        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Field-wise merge, `later` wins
    pub fn merge(earlier: Settings, later: Settings) -> Settings {
        Settings {
            api_key: later.api_key.or(earlier.api_key),
            base_url: later.base_url.or(earlier.base_url),
            model: later.model.or(earlier.model),
            temperature: later.temperature.or(earlier.temperature),
            max_tokens: later.max_tokens.or(earlier.max_tokens),
            timeout_secs: later.timeout_secs.or(earlier.timeout_secs),
            max_retries: later.max_retries.or(earlier.max_retries),
            tokenizer: later.tokenizer.or(earlier.tokenizer),
            token_budget: later.token_budget.or(earlier.token_budget),
            sub_chunk_tokens: later.sub_chunk_tokens.or(earlier.sub_chunk_tokens),
            batch_size: later.batch_size.or(earlier.batch_size),
        }
    }

    /// Resolved summarizer knobs, validated
    pub fn summarizer_config(&self) -> Result<SummarizerConfig> {
        let defaults = SummarizerConfig::default();
        let config = SummarizerConfig {
            token_budget: self.token_budget.unwrap_or(defaults.token_budget),
            sub_chunk_tokens: self.sub_chunk_tokens.unwrap_or(defaults.sub_chunk_tokens),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn llm_settings(&self) -> LlmSettings {
        let defaults = LlmSettings::default();
        LlmSettings {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone().unwrap_or(defaults.base_url),
            model: self.model.clone().unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.or(defaults.max_tokens),
            timeout_secs: self.timeout_secs.unwrap_or(defaults.timeout_secs),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
        }
    }

    pub fn tokenizer_name(&self) -> &str {
        self.tokenizer
            .as_deref()
            .or(self.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }
}
