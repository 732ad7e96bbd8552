//! Account commands: `account` and `account bandwidth`.

use super::{CommandSpec, CommandUnit, RawInput};
use crate::cli::Resource;
use crate::error::{RemoteError, ValidationError};
use crate::session::SessionContext;
use async_trait::async_trait;

const ACCOUNT: CommandSpec = CommandSpec {
    name: "account",
    short_help: "Get account information",
    long_help: "Retrieve information about your account.",
    example: "  # Full example\n  stratus account",
    requires_auth: true,
};

const BANDWIDTH: CommandSpec = CommandSpec {
    name: "bandwidth",
    short_help: "Get account bandwidth usage",
    long_help: "Retrieve bandwidth usage for your account: the previous month, \
                the current month to date, and the projection for the current month.",
    example: "  # Full example\n  stratus account bandwidth\n\n  \
              # As JSON\n  stratus account bandwidth --output json",
    requires_auth: true,
};

/// Account summary of the authenticated user.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountCommand;

#[async_trait]
impl CommandUnit for AccountCommand {
    type Options = ();

    fn spec(&self) -> &CommandSpec {
        &ACCOUNT
    }

    fn validate(&self, _raw: &RawInput) -> Result<(), ValidationError> {
        Ok(())
    }

    async fn execute(&self, ctx: &SessionContext, _options: &()) -> Result<Resource, RemoteError> {
        ctx.client().get_account().await.map(Resource::from)
    }
}

/// Bandwidth usage of the authenticated user's account.
#[derive(Debug, Clone, Copy, Default)]
pub struct BandwidthCommand;

#[async_trait]
impl CommandUnit for BandwidthCommand {
    type Options = ();

    fn spec(&self) -> &CommandSpec {
        &BANDWIDTH
    }

    fn validate(&self, _raw: &RawInput) -> Result<(), ValidationError> {
        Ok(())
    }

    async fn execute(&self, ctx: &SessionContext, _options: &()) -> Result<Resource, RemoteError> {
        ctx.client().get_bandwidth().await.map(Resource::from)
    }
}
