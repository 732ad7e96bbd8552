//! Environment source: STRATUS_API_KEY, STRATUS_API_ENDPOINT, STRATUS_OUTPUT,
//! and nested keys such as STRATUS_HTTP__REQUEST_TIMEOUT_SECS.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "STRATUS";

/// Add the environment source to builder. Always last so it wins.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__"),
    )
}
