//! Service configuration, loaded from TOML or from the environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::clients::ClientError;
use crate::generator::GenerationSettings;
use crate::orchestrator::FailurePolicy;

/// Errors raised while loading configuration or building clients from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to create client: {0}")]
    Client(#[from] ClientError),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub provider: ProviderConfig,
    pub sheets: SheetsConfig,
    pub batch: BatchConfig,
}

/// Text-generation provider settings.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        let settings = GenerationSettings::default();
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            timeout_secs: 60,
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// Spreadsheet store settings. Without a token, batches are unavailable.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub api_url: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://sheets.googleapis.com".to_string(),
            access_token: None,
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for SheetsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsConfig")
            .field("api_url", &self.api_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub failure_policy: FailurePolicy,
}

impl ServiceConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Reads configuration from process environment variables.
    ///
    /// | Variable                 | Field                   |
    /// |--------------------------|-------------------------|
    /// | `OPENAI_API_KEY`         | `provider.api_key` (required) |
    /// | `OPENAI_API_URL`         | `provider.api_url`      |
    /// | `OPENAI_MODEL`           | `provider.model`        |
    /// | `OPENAI_TEMPERATURE`     | `provider.temperature`  |
    /// | `OPENAI_MAX_TOKENS`      | `provider.max_tokens`   |
    /// | `GOOGLE_SHEETS_TOKEN`    | `sheets.access_token`   |
    /// | `GOOGLE_SHEETS_API_URL`  | `sheets.api_url`        |
    /// | `LISTING_FAILURE_POLICY` | `batch.failure_policy`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.provider.api_key =
            var("OPENAI_API_KEY").ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".into()))?;
        if let Some(url) = var("OPENAI_API_URL") {
            config.provider.api_url = url;
        }
        if let Some(model) = var("OPENAI_MODEL") {
            config.provider.model = model;
        }
        if let Some(temperature) = parse_var(&var, "OPENAI_TEMPERATURE")? {
            config.provider.temperature = temperature;
        }
        if let Some(max_tokens) = parse_var(&var, "OPENAI_MAX_TOKENS")? {
            config.provider.max_tokens = max_tokens;
        }
        config.sheets.access_token = var("GOOGLE_SHEETS_TOKEN");
        if let Some(url) = var("GOOGLE_SHEETS_API_URL") {
            config.sheets.api_url = url;
        }
        if let Some(policy) = parse_var(&var, "LISTING_FAILURE_POLICY")? {
            config.batch.failure_policy = policy;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_key.trim().is_empty() {
            return Err(invalid("provider.api_key", "must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(invalid("provider.temperature", "must be between 0.0 and 2.0"));
        }
        if self.provider.max_tokens == 0 {
            return Err(invalid("provider.max_tokens", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    var(key)
        .map(|raw| raw.trim().parse::<T>().map_err(|e| invalid(key, e.to_string())))
        .transpose()
}
