//! Test doubles and common utilities for update cycle contract tests
//!
//! The doubles count their calls through shared `Arc` counters: clone one,
//! box the clone into the engine, keep the original to assert on.

use nsone_core::config::{DdnsConfig, EngineConfig, RecordConfig};
use nsone_core::error::{Error, Result};
use nsone_core::traits::{DnsProvider, IpSource, ResolvedAddress};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// An IpSource that returns a fixed answer
#[derive(Clone)]
pub struct FixedIpSource {
    address: Option<ResolvedAddress>,
    resolve_call_count: Arc<AtomicUsize>,
}

impl FixedIpSource {
    /// Always resolves to `address`
    pub fn new(address: &str) -> Self {
        Self {
            address: ResolvedAddress::new(address),
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Never resolves an address
    pub fn empty() -> Self {
        Self {
            address: None,
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times resolve() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for FixedIpSource {
    async fn resolve(&self) -> Option<ResolvedAddress> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        self.address.clone()
    }

    fn source_name(&self) -> &'static str {
        "fixed"
    }
}

/// A DnsProvider that records pushes and answers with a switchable verdict
#[derive(Clone)]
pub struct MockDnsProvider {
    push_call_count: Arc<AtomicUsize>,
    pushes: Arc<Mutex<Vec<(RecordConfig, String)>>>,
    accept: Arc<AtomicBool>,
    gate: Option<Arc<Notify>>,
}

impl MockDnsProvider {
    /// Provider that accepts every push
    pub fn accepting() -> Self {
        Self {
            push_call_count: Arc::new(AtomicUsize::new(0)),
            pushes: Arc::new(Mutex::new(Vec::new())),
            accept: Arc::new(AtomicBool::new(true)),
            gate: None,
        }
    }

    /// Provider that rejects every push
    pub fn rejecting() -> Self {
        let provider = Self::accepting();
        provider.set_accept(false);
        provider
    }

    /// Provider whose pushes block until `gate` is notified
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::accepting()
        }
    }

    /// Change the verdict for subsequent pushes
    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Get the number of times push() was called
    pub fn push_call_count(&self) -> usize {
        self.push_call_count.load(Ordering::SeqCst)
    }

    /// Get every (record, address) pair that was pushed
    pub fn pushes(&self) -> Vec<(RecordConfig, String)> {
        self.pushes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn push(&self, record: &RecordConfig, address: &ResolvedAddress) -> Result<()> {
        self.push_call_count.fetch_add(1, Ordering::SeqCst);
        self.pushes
            .lock()
            .unwrap()
            .push((record.clone(), address.to_string()));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        if self.accept.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::provider("mock", "HTTP 400 Bad Request"))
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create a minimal DdnsConfig for testing
pub fn minimal_config(zone: &str) -> DdnsConfig {
    DdnsConfig::new(zone, "xyz789").with_engine(EngineConfig {
        interval_secs: 300,
        event_channel_capacity: 100,
    })
}
