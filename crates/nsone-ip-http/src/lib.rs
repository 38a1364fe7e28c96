// # HTTP IP Source
//
// This crate provides the ipify-backed IP source for the NS1 updater.
//
// ## Protocol
//
// ```http
// GET https://api.ipify.org/?format=json
//
// 200 OK
// {"ip": "198.51.100.7"}
// ```
//
// ## Failure Policy
//
// Every failure collapses to "no address": transport error, non-success
// status, a body that is not JSON, an `ip` field that is missing, null or
// empty. The update cycle then skips the push. There is no retry here; the
// next scheduled cycle is the retry.

use nsone_core::traits::{IpSource, ResolvedAddress};
use nsone_core::{Error, Result};

use serde::Deserialize;
use tracing::{debug, warn};

/// Default IP discovery endpoint
pub const IPIFY_URL: &str = "https://api.ipify.org/?format=json";

/// Body returned by the discovery endpoint
#[derive(Debug, Deserialize)]
struct IpifyResponse {
    #[serde(default)]
    ip: Option<String>,
}

/// ipify-backed IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch the address from
    url: String,

    /// HTTP client, shared with the rest of the host
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create an IP source querying [`IPIFY_URL`]
    ///
    /// # Parameters
    ///
    /// - `client`: HTTP client to issue requests with (connection pooling is
    ///   the host's concern, pass a shared one)
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_url(client, IPIFY_URL)
    }

    /// Create an IP source querying a custom endpoint
    ///
    /// The endpoint must answer with the same JSON shape as ipify.
    pub fn with_url(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// The endpoint this source queries
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch current address from the discovery endpoint
    async fn fetch_ip(&self) -> Result<ResolvedAddress> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::ip_source(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ip_source(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let body: IpifyResponse = response
            .json()
            .await
            .map_err(|e| Error::ip_source(format!("Failed to parse response: {}", e)))?;

        body.ip
            .and_then(ResolvedAddress::new)
            .ok_or_else(|| Error::ip_source("Response carries no address"))
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn resolve(&self) -> Option<ResolvedAddress> {
        match self.fetch_ip().await {
            Ok(address) => {
                debug!("{} reported {}", self.url, address);
                Some(address)
            }
            Err(e) => {
                warn!("Public address lookup failed: {}", e);
                None
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "ipify"
    }
}
