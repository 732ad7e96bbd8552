//! Session context shared by every command unit of one invocation.
//!
//! Built once from the loaded configuration before dispatch and passed to units
//! by reference. Nothing here is process-global.

use crate::cli::OutputMode;
use crate::config::StratusConfig;
use crate::error::ConfigError;
use crate::remote::{HttpClient, RemoteService};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub struct SessionContext {
    authenticated: bool,
    client: Arc<dyn RemoteService>,
    output: OutputMode,
}

impl SessionContext {
    /// Build a session from configuration. No network traffic happens here.
    pub fn new(config: &StratusConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::from_validation)?;

        let api_key = config.api_key()?.map(str::to_string);
        let endpoint = config.endpoint_url()?;
        let output = config.output_mode()?;

        let authenticated = api_key.is_some();
        let client = HttpClient::new(endpoint, api_key, &config.http)?;
        debug!(
            authenticated,
            endpoint = client.base_url(),
            output = %output,
            "Session context built"
        );

        Ok(Self {
            authenticated,
            client: Arc::new(client),
            output,
        })
    }

    /// Build a session around an existing client.
    pub fn with_client(
        authenticated: bool,
        client: Arc<dyn RemoteService>,
        output: OutputMode,
    ) -> Self {
        Self {
            authenticated,
            client,
            output,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn client(&self) -> &dyn RemoteService {
        self.client.as_ref()
    }

    /// Default output mode for this invocation
    pub fn output_mode(&self) -> OutputMode {
        self.output
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("authenticated", &self.authenticated)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}
