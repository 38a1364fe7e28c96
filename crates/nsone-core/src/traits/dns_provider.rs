// # DNS Provider Trait
//
// Defines the interface for pushing an address record to the managed DNS API.
//
// ## Implementations
//
// - NS1: `nsone-provider` crate
//
// ## Usage
//
// ```rust,ignore
// use nsone_core::{DnsProvider, DdnsConfig, ResolvedAddress};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//     let record = DdnsConfig::new("example.com", "key").record()?;
//
//     provider
//         .push(&record, &ResolvedAddress::new("192.0.2.1").unwrap())
//         .await?;
//
//     Ok(())
// }
// ```

use crate::config::RecordConfig;
use crate::traits::ip_source::ResolvedAddress;
use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// # Contract
///
/// - Exactly one HTTP request per call
/// - Payload is built from `address` on every call, never cached
/// - No retry or backoff; the engine's schedule decides when to try again
/// - No state is kept between calls
/// - `Ok(())` only when the provider confirmed the update
///
/// The `Err` value classifies the failure for callers that care; the update
/// cycle itself only looks at `is_ok()`.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Set the A record described by `record` to `address`
    async fn push(
        &self,
        record: &RecordConfig,
        address: &ResolvedAddress,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
