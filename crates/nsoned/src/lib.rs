// # nsoned
//
// Host side of the NS1 updater: wires the ipify source and the NS1 provider
// into an update cycle, hands the cycle to the host's scheduler and reports
// whether the startup update went through.
//
// This is a THIN integration layer. Resolve/push/schedule logic lives in
// nsone-core; nothing here retries or inspects DNS state.

pub mod settings;

pub use settings::DaemonConfig;

use nsone_core::{DdnsConfig, Scheduler, UpdateCycle};
use nsone_ip_http::{HttpIpSource, IPIFY_URL};
use nsone_provider::{NSONE_API_BASE, NsoneProvider};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Remote endpoints the updater talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Public address discovery URL
    pub ip_url: String,

    /// NS1 zones API base, up to and including `/zones`
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ip_url: IPIFY_URL.to_string(),
            api_base: NSONE_API_BASE.to_string(),
        }
    }
}

/// Services the host lends to the updater
#[derive(Clone)]
pub struct Host {
    /// Shared HTTP client used for both discovery and updates
    pub client: reqwest::Client,

    /// Periodic callback service
    pub scheduler: Arc<dyn Scheduler>,

    /// Where requests go
    pub endpoints: Endpoints,
}

impl Host {
    /// Host talking to the production endpoints
    pub fn new(client: reqwest::Client, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            client,
            scheduler,
            endpoints: Endpoints::default(),
        }
    }

    /// Override the remote endpoints
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

/// Start the updater
///
/// Runs one update immediately. If it succeeds the cycle is registered with
/// `host.scheduler` and repeats every configured interval for as long as the
/// scheduler lives. If it fails nothing is registered.
///
/// # Returns
///
/// `true` if the startup update reached NS1 and was accepted
pub async fn setup(host: &Host, config: DdnsConfig) -> bool {
    let ip_source = HttpIpSource::with_url(host.client.clone(), &host.endpoints.ip_url);
    let provider = NsoneProvider::with_base_url(host.client.clone(), &host.endpoints.api_base);

    let created = UpdateCycle::new(Box::new(ip_source), Box::new(provider), &config);
    let (cycle, mut events) = match created {
        Ok(created) => created,
        Err(e) => {
            error!("Invalid NS1 updater configuration: {}", e);
            return false;
        }
    };

    // Ends when the last cycle handle is dropped
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            debug!("Engine event: {:?}", event);
        }
    });

    let cycle = Arc::new(cycle);
    if !cycle.start(host.scheduler.as_ref()).await {
        let record = cycle.record();
        error!(
            "NS1 updater failed to start for {}/{}",
            record.zone, record.domain
        );
        return false;
    }

    info!("NS1 updater started");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsone_core::ManualScheduler;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.ip_url, "https://api.ipify.org/?format=json");
        assert_eq!(endpoints.api_base, "https://api.nsone.net/v1/zones");
    }

    #[tokio::test]
    async fn test_invalid_config_fails_without_requests() {
        let scheduler = Arc::new(ManualScheduler::new());
        let endpoints = Endpoints {
            ip_url: "http://127.0.0.1:1/".to_string(),
            api_base: "http://127.0.0.1:1/v1/zones".to_string(),
        };
        let host = Host::new(reqwest::Client::new(), scheduler.clone()).with_endpoints(endpoints);

        assert!(!setup(&host, DdnsConfig::new("", "xyz789")).await);
        assert!(scheduler.periods().is_empty());
    }
}
