//! Configuration System
//!
//! Layered configuration for stratus: built-in defaults, then the global config
//! file (or an explicit `--config` file), then `STRATUS_*` environment variables.
//! The loaded configuration is only consumed when building the session context.

use crate::cli::OutputMode;
use crate::error::ConfigError;
use crate::logging::LoggingConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.vultr.com/v2";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StratusConfig {
    /// API key used as the bearer token; absent means unauthenticated
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the provider API
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,

    /// Default output mode: human, json, yaml
    #[serde(default = "default_output")]
    pub output: String,

    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP transport settings for the remote service client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

fn default_output() -> String {
    "human".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidHttp(
                "connect_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidHttp(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StratusConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_endpoint: default_api_endpoint(),
            output: default_output(),
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StratusConfig {
    /// The configured API key, if any. A blank key counts as absent; a key with
    /// embedded whitespace or control characters is malformed.
    pub fn api_key(&self) -> Result<Option<&str>, ConfigError> {
        let key = match self.api_key.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(key) => key,
        };
        if key.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ConfigError::MalformedApiKey(
                "key must not contain whitespace or control characters".to_string(),
            ));
        }
        Ok(Some(key))
    }

    /// The API endpoint as an absolute http(s) URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.api_endpoint.clone(),
            reason,
        };
        let url = Url::parse(self.api_endpoint.trim()).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!(
                "unsupported scheme '{}' (must be http or https)",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        Ok(url)
    }

    /// The configured default output mode.
    pub fn output_mode(&self) -> Result<OutputMode, ConfigError> {
        self.output
            .parse()
            .map_err(|_| ConfigError::InvalidOutput(self.output.clone()))
    }

    /// Validate the entire configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.api_key() {
            errors.push(e);
        }
        if let Err(e) = self.endpoint_url() {
            errors.push(e);
        }
        if let Err(e) = self.output_mode() {
            errors.push(e);
        }
        if let Err(e) = self.http.validate() {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
