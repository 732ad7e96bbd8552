//! Remote Service Client
//!
//! The provider API as seen by command units: one async method per remote
//! operation, each performing at most one request. Decoding of the wire format
//! stays behind this trait.

use crate::error::RemoteError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod http;

pub use http::HttpClient;

/// Account summary for the authenticated user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub acls: Vec<String>,
    pub balance: f64,
    pub pending_charges: f64,
    pub last_payment_date: String,
    pub last_payment_amount: f64,
}

/// Bandwidth usage for one billing period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandwidthPeriod {
    pub timestamp_start: String,
    pub timestamp_end: String,
    pub gb_in: u64,
    pub gb_out: u64,
    pub total_instance_hours: u64,
    pub overage: f64,
    pub overage_cost: f64,
}

/// Account bandwidth usage across the reporting periods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountBandwidth {
    pub previous_month: BandwidthPeriod,
    pub current_month_to_date: BandwidthPeriod,
    pub current_month_projected: BandwidthPeriod,
}

/// A datacenter region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Region {
    pub id: String,
    pub city: String,
    pub country: String,
    pub continent: String,
    pub options: Vec<String>,
}

/// Pagination cursors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    pub next: String,
    pub prev: String,
}

/// List metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub total: u64,
    pub links: Links,
}

/// One page of regions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionPage {
    pub regions: Vec<Region>,
    pub meta: Meta,
}

/// Pagination options for list operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub per_page: Option<u32>,
    pub cursor: Option<String>,
}

impl ListOptions {
    /// Query parameters in the provider's naming.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(ref cursor) = self.cursor {
            pairs.push(("cursor", cursor.clone()));
        }
        pairs
    }
}

/// Remote service client trait
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// Fetch the account of the authenticated user
    async fn get_account(&self) -> Result<Account, RemoteError>;

    /// Fetch bandwidth usage of the authenticated user's account
    async fn get_bandwidth(&self) -> Result<AccountBandwidth, RemoteError>;

    /// List one page of available regions
    async fn list_regions(&self, options: &ListOptions) -> Result<RegionPage, RemoteError>;
}
