//! HTTP implementation of the remote service client over reqwest.

use super::{Account, AccountBandwidth, ListOptions, RegionPage, RemoteService};
use crate::config::HttpConfig;
use crate::error::{ConfigError, RemoteError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

const USER_AGENT: &str = concat!("stratus/", env!("CARGO_PKG_VERSION"));

/// Provider API client. Sends the bearer token only when one is configured.
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct AccountEnvelope {
    account: Account,
}

#[derive(Deserialize)]
struct BandwidthEnvelope {
    bandwidth: AccountBandwidth,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpClient {
    pub fn new(
        base_url: Url,
        api_key: Option<String>,
        http: &HttpConfig,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(http.connect_timeout())
            .timeout(http.request_timeout())
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Issue one GET request and decode the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        action: &str,
    ) -> Result<T, RemoteError> {
        let url = self.url(path);
        let mut request = self.client.get(&url).header(ACCEPT, "application/json");
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        debug!(url = %url, "Sending API request");
        let response = request
            .send()
            .await
            .map_err(|e| map_transport_error(action, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    debug!(status = %status, error = %e, "Failed to read error response body");
                    String::new()
                }
            };
            return Err(map_status_error(action, status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RemoteError::new(format!("{} (malformed response)", action), e))
    }
}

/// Map transport-level failures (no HTTP status received).
fn map_transport_error(action: &str, error: reqwest::Error) -> RemoteError {
    let category = if error.is_timeout() {
        "request timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "HTTP error"
    };
    RemoteError::new(format!("{} ({})", action, category), error)
}

/// Map a non-success HTTP status, preferring the API's own error message.
fn map_status_error(action: &str, status: StatusCode, body: &str) -> RemoteError {
    let category = match status.as_u16() {
        401 | 403 => "authentication rejected",
        404 => "not found",
        429 => "rate limit exceeded",
        500..=599 => "server error",
        _ => "request failed",
    };
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .or_else(|| {
            let trimmed = body.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });
    RemoteError::new(
        format!("{} ({})", action, category),
        format!("HTTP {}: {}", status.as_u16(), detail),
    )
}

#[async_trait]
impl RemoteService for HttpClient {
    async fn get_account(&self) -> Result<Account, RemoteError> {
        let envelope: AccountEnvelope = self
            .get("account", &[], "Error getting account information")
            .await?;
        Ok(envelope.account)
    }

    async fn get_bandwidth(&self) -> Result<AccountBandwidth, RemoteError> {
        let envelope: BandwidthEnvelope = self
            .get("account/bandwidth", &[], "Error getting account bandwidth")
            .await?;
        Ok(envelope.bandwidth)
    }

    async fn list_regions(&self, options: &ListOptions) -> Result<RegionPage, RemoteError> {
        self.get("regions", &options.query_pairs(), "Error listing regions")
            .await
    }
}
