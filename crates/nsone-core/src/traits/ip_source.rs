// # IP Source Trait
//
// Defines the interface for discovering the caller's current public address.
//
// ## Implementations
//
// - ipify JSON endpoint: `nsone-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use nsone_core::IpSource;
//
// #[tokio::main]
// async fn main() {
//     let source = /* IpSource implementation */;
//
//     match source.resolve().await {
//         Some(address) => println!("public address: {}", address),
//         None => println!("resolution failed"),
//     }
// }
// ```

use async_trait::async_trait;

/// A public address as reported by an [`IpSource`]
///
/// The value is forwarded to the provider verbatim. The only invariant is
/// that it is not blank: an empty or whitespace-only answer is the same as
/// no answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedAddress(String);

impl ResolvedAddress {
    /// Wrap a raw address, returning `None` for empty or blank input
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return None;
        }
        Some(Self(raw))
    }

    /// The address as sent to the provider
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResolvedAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for IP source implementations
///
/// # Contract
///
/// - One outbound request per call, no retries (the schedule is the retry)
/// - Unreachable endpoint, unparseable body, empty or missing address all
///   yield `None`; nothing is raised to the caller
/// - Callers must not push a record when `None` is returned
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Resolve the current public address
    async fn resolve(&self) -> Option<ResolvedAddress>;

    /// Name of the discovery service (for logging/debugging)
    fn source_name(&self) -> &'static str;
}
