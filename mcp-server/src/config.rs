use anyhow::{Context, Result};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use matrix_core::UpstreamSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Prefix for structured overrides, e.g. `MATRIX_MCP__LOGGING__FORMAT=json`
const ENV_PREFIX: &str = "MATRIX_MCP";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the Matrix API, without trailing slash
    pub base_url: String,
    /// Sent as `x-api-key` on every request
    #[serde(default, skip_serializing)]
    pub api_key: String,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (pretty, json, compact)
    pub format: LogFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
    Compact,
}

impl Config {
    /// Load configuration from built-in defaults, `CONFIG_FILE` and environment variables
    pub fn from_env() -> Result<Self> {
        let config_file = env::var("CONFIG_FILE").ok();
        Self::load(config_file.as_deref(), false, |key| env::var(key).ok())
    }

    /// Load configuration with a specific file layered over the defaults
    pub fn from_file(path: &str) -> Result<Self> {
        Self::load(Some(path), true, |key| env::var(key).ok())
    }

    fn load<F>(config_file: Option<&str>, file_required: bool, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ConfigBuilder::builder().add_source(File::from_str(
            include_str!("../config/default.toml"),
            FileFormat::Toml,
        ));

        if let Some(path) = config_file {
            builder = builder.add_source(
                File::with_name(path)
                    .required(file_required)
                    .format(FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to build configuration")?;

        let mut result: Config = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        result.apply_standard_env_vars(lookup);
        Ok(result)
    }

    /// Apply MATRIX_API_KEY, MATRIX_BASE_URL and LOG_LEVEL
    pub fn apply_standard_env_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup("MATRIX_API_KEY") {
            self.api.api_key = api_key;
        }

        if let Some(base_url) = lookup("MATRIX_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.logging.level = log_level;
        }
    }

    /// Connection settings for the HTTP client
    pub fn upstream_settings(&self) -> UpstreamSettings {
        UpstreamSettings::new(self.api.base_url.trim(), self.api.api_key.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.api_key.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "MATRIX_API_KEY environment variable is required"
            ));
        }

        let base_url = url::Url::parse(self.api.base_url.trim())
            .with_context(|| format!("Invalid Matrix base URL: {}", self.api.base_url))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "Matrix base URL must use http or https. Got: {}",
                self.api.base_url
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                ));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: matrix_core::DEFAULT_BASE_URL.to_string(),
                api_key: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Compact,
            },
        }
    }
}
