//! Region commands: `regions list`.

use super::{CommandSpec, CommandUnit, RawInput};
use crate::cli::Resource;
use crate::error::{RemoteError, ValidationError};
use crate::remote::ListOptions;
use crate::session::SessionContext;
use async_trait::async_trait;
use clap::Arg;

/// Largest page the provider serves.
pub const MAX_PER_PAGE: u32 = 500;

const REGION_LIST: CommandSpec = CommandSpec {
    name: "list",
    short_help: "List all available regions",
    long_help: "List the datacenter regions you can deploy to. Results are paginated; \
                pass the printed next cursor back with --cursor to fetch the next page.",
    example: "  # Full example\n  stratus regions list\n\n  \
              # Paging\n  stratus regions list --per-page 10 --cursor bmV4dF9fQU1T",
    requires_auth: false,
};

/// Validated options for `regions list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionListOptions {
    pub list: ListOptions,
}

/// One page of available regions. Needs no credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionListCommand;

fn parse_per_page(value: &str) -> Result<u32, ValidationError> {
    let per_page: u32 = value.trim().parse().map_err(|_| {
        ValidationError::new("per-page", format!("'{}' is not a positive integer", value))
    })?;
    if per_page == 0 || per_page > MAX_PER_PAGE {
        return Err(ValidationError::new(
            "per-page",
            format!("must be between 1 and {}", MAX_PER_PAGE),
        ));
    }
    Ok(per_page)
}

fn parse_cursor(value: &str) -> Result<String, ValidationError> {
    let cursor = value.trim();
    if cursor.is_empty() {
        return Err(ValidationError::new("cursor", "must not be empty"));
    }
    if cursor.chars().any(char::is_whitespace) {
        return Err(ValidationError::new("cursor", "must not contain whitespace"));
    }
    Ok(cursor.to_string())
}

#[async_trait]
impl CommandUnit for RegionListCommand {
    type Options = RegionListOptions;

    fn spec(&self) -> &CommandSpec {
        &REGION_LIST
    }

    fn arguments(&self) -> Vec<Arg> {
        vec![
            Arg::new("per_page")
                .long("per-page")
                .short('p')
                .value_name("COUNT")
                .help("Number of items per page (1-500)"),
            Arg::new("cursor")
                .long("cursor")
                .short('c')
                .value_name("CURSOR")
                .help("Cursor of the page to fetch"),
        ]
    }

    fn validate(&self, raw: &RawInput) -> Result<RegionListOptions, ValidationError> {
        let per_page = raw.string("per_page")?.map(parse_per_page).transpose()?;
        let cursor = raw.string("cursor")?.map(parse_cursor).transpose()?;
        Ok(RegionListOptions {
            list: ListOptions { per_page, cursor },
        })
    }

    async fn execute(
        &self,
        ctx: &SessionContext,
        options: &RegionListOptions,
    ) -> Result<Resource, RemoteError> {
        ctx.client()
            .list_regions(&options.list)
            .await
            .map(Resource::from)
    }
}
