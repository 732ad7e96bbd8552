//! CLI presentation: the renderable capability and the closed set of result shapes.

mod account;
mod region;
mod shared;

use crate::remote::{Account, AccountBandwidth, RegionPage};
use serde_json::Value;

pub use shared::{format_money, format_timestamp};

/// A value the result printer can show in every output mode.
pub trait Renderable {
    /// Human-readable text, tables and labels.
    fn render_human(&self) -> String;

    /// Structured form serialized for json and yaml output.
    fn render_structured(&self) -> Value;
}

/// Every result shape a command unit can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Account(Account),
    Bandwidth(AccountBandwidth),
    Regions(RegionPage),
}

impl Resource {
    pub fn kind(&self) -> &'static str {
        match self {
            Resource::Account(_) => "account",
            Resource::Bandwidth(_) => "bandwidth",
            Resource::Regions(_) => "regions",
        }
    }
}

impl From<Account> for Resource {
    fn from(account: Account) -> Self {
        Resource::Account(account)
    }
}

impl From<AccountBandwidth> for Resource {
    fn from(bandwidth: AccountBandwidth) -> Self {
        Resource::Bandwidth(bandwidth)
    }
}

impl From<RegionPage> for Resource {
    fn from(page: RegionPage) -> Self {
        Resource::Regions(page)
    }
}

impl Renderable for Resource {
    fn render_human(&self) -> String {
        match self {
            Resource::Account(account) => account.render_human(),
            Resource::Bandwidth(bandwidth) => bandwidth.render_human(),
            Resource::Regions(page) => page.render_human(),
        }
    }

    fn render_structured(&self) -> Value {
        match self {
            Resource::Account(account) => account.render_structured(),
            Resource::Bandwidth(bandwidth) => bandwidth.render_structured(),
            Resource::Regions(page) => page.render_structured(),
        }
    }
}
