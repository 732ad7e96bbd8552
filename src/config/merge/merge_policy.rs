//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources override earlier ones: defaults, then a config file, then the
//! environment.

use crate::config::DEFAULT_API_ENDPOINT;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("api_endpoint", DEFAULT_API_ENDPOINT)?
        .set_default("output", "human")?
        .set_default("http.connect_timeout_secs", 10)?
        .set_default("http.request_timeout_secs", 60)
}
