// # NS1 DNS Provider
//
// This crate provides the NS1 implementation of `DnsProvider`.
//
// ## Behavior
//
// - One POST per push, nothing else (no zone lookup, no read-before-write)
// - Payload rebuilt from the address on every call
// - Success means HTTP 200 exactly; any other status is a failed push
// - The response body is never read
// - No retry, no backoff, no caching; the engine's schedule owns timing
//
// ## Security Requirements
//
// - API key NEVER appears in logs or Debug output
// - API key travels only in the `X-NSONE-Key` header
//
// ## API Reference
//
// ```http
// POST /v1/zones/:zone/:domain/A
// X-NSONE-Key: <api key>
//
// {"answers":[{"answer":["198.51.100.7"]}]}
// ```

pub mod payload;

pub use payload::{Answer, UpdatePayload};

use async_trait::async_trait;
use nsone_core::config::RecordConfig;
use nsone_core::traits::{DnsProvider, ResolvedAddress};
use nsone_core::{Error, Result};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

/// NS1 zones API base URL
pub const NSONE_API_BASE: &str = "https://api.nsone.net/v1/zones";

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-NSONE-Key";

/// Record type this provider manages
const RECORD_TYPE: &str = "A";

/// NS1 DNS provider
///
/// Stateless apart from the shared HTTP client and the base URL. The key,
/// zone and domain come with every push.
#[derive(Debug, Clone)]
pub struct NsoneProvider {
    /// Base URL up to and including `/zones`
    base_url: String,

    /// HTTP client, shared with the rest of the host
    client: reqwest::Client,
}

impl NsoneProvider {
    /// Create a provider talking to [`NSONE_API_BASE`]
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_base_url(client, NSONE_API_BASE)
    }

    /// Create a provider talking to a custom base URL
    ///
    /// Mainly useful for pointing at a test double.
    pub fn with_base_url(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Endpoint for the A record of `record`
    pub fn record_url(&self, record: &RecordConfig) -> String {
        format!(
            "{}/{}/{}/{}",
            self.base_url, record.zone, record.domain, RECORD_TYPE
        )
    }
}

/// Classify a non-200 status
///
/// The body is not consulted; the status alone decides.
fn status_error(status: StatusCode) -> Error {
    match status.as_u16() {
        401 | 403 => Error::auth(format!(
            "Invalid API key or insufficient permissions. Status: {}",
            status
        )),
        404 => Error::not_found(format!("Zone or record not found. Status: {}", status)),
        429 => Error::rate_limited(format!("Rate limit exceeded. Status: {}", status)),
        500..=599 => Error::provider(
            "nsone",
            format!("NS1 server error (transient): {}", status),
        ),
        _ => Error::provider("nsone", format!("Update rejected: {}", status)),
    }
}

#[async_trait]
impl DnsProvider for NsoneProvider {
    async fn push(&self, record: &RecordConfig, address: &ResolvedAddress) -> Result<()> {
        let url = self.record_url(record);
        let body = serde_json::to_string(&UpdatePayload::for_address(address))?;

        debug!("Updating NS1 {} with {}", url, body);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &record.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "Updating NS1 zone/domain failed: {}/{}: {}",
                    record.zone, record.domain, e
                );
                return Err(Error::http(format!("Request failed: {}", e)));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(
                "Updating NS1 zone/domain failed: {}/{} (status {})",
                record.zone, record.domain, status
            );
            return Err(status_error(status));
        }

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "nsone"
    }
}
