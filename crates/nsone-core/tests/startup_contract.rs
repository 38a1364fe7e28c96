//! Contract Test: Startup Cycle
//!
//! The startup cycle's boolean is the module's readiness signal.
//!
//! Constraints verified:
//! - A resolved address is pushed exactly once, no retry
//! - No address means no push and a failed start
//! - A rejected push means a failed start
//! - Periodic cycles are registered only after a good start
//! - An omitted domain falls back to the zone

mod common;

use common::*;
use nsone_core::engine::{CycleOutcome, EngineEvent};
use nsone_core::{ManualScheduler, UpdateCycle};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn successful_startup_pushes_once_and_schedules() {
    let ip_source = FixedIpSource::new("0.0.0.0");
    let provider = MockDnsProvider::accepting();
    let scheduler = ManualScheduler::new();

    let (cycle, _event_rx) = UpdateCycle::new(
        Box::new(ip_source.clone()),
        Box::new(provider.clone()),
        &minimal_config("test.example.com").with_domain("test.example.com"),
    )
    .expect("cycle construction succeeds");

    let started = Arc::new(cycle).start(&scheduler).await;

    assert!(started, "startup reports success when the push is accepted");
    assert_eq!(ip_source.resolve_call_count(), 1);
    assert_eq!(provider.push_call_count(), 1);
    assert_eq!(scheduler.periods(), vec![Duration::from_secs(300)]);

    let pushes = provider.pushes();
    assert_eq!(pushes[0].0.zone, "test.example.com");
    assert_eq!(pushes[0].0.domain, "test.example.com");
    assert_eq!(pushes[0].0.api_key, "xyz789");
    assert_eq!(pushes[0].1, "0.0.0.0");
}

#[tokio::test]
async fn rejected_push_fails_startup_without_retry() {
    let ip_source = FixedIpSource::new("0.0.0.0");
    let provider = MockDnsProvider::rejecting();
    let scheduler = ManualScheduler::new();

    let (cycle, _event_rx) = UpdateCycle::new(
        Box::new(ip_source.clone()),
        Box::new(provider.clone()),
        &minimal_config("test.example.com"),
    )
    .expect("cycle construction succeeds");

    let started = Arc::new(cycle).start(&scheduler).await;

    assert!(!started, "startup reports failure when the push is rejected");
    assert_eq!(ip_source.resolve_call_count(), 1);
    assert_eq!(provider.push_call_count(), 1, "no retry within a cycle");
    assert!(scheduler.periods().is_empty(), "nothing scheduled after a failed start");
}

#[tokio::test]
async fn missing_address_never_reaches_provider() {
    let ip_source = FixedIpSource::empty();
    let provider = MockDnsProvider::accepting();
    let scheduler = ManualScheduler::new();

    let (cycle, _event_rx) = UpdateCycle::new(
        Box::new(ip_source.clone()),
        Box::new(provider.clone()),
        &minimal_config("test.example.com"),
    )
    .expect("cycle construction succeeds");

    let started = Arc::new(cycle).start(&scheduler).await;

    assert!(!started);
    assert_eq!(ip_source.resolve_call_count(), 1);
    assert_eq!(provider.push_call_count(), 0);
    assert!(scheduler.periods().is_empty());
}

#[tokio::test]
async fn omitted_domain_pushes_to_zone() {
    let provider = MockDnsProvider::accepting();

    let (cycle, _event_rx) = UpdateCycle::new(
        Box::new(FixedIpSource::new("192.0.2.10")),
        Box::new(provider.clone()),
        &minimal_config("example.com"),
    )
    .expect("cycle construction succeeds");

    assert_eq!(cycle.record().domain, "example.com");
    assert!(cycle.run_once().await);

    let pushes = provider.pushes();
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].0.domain, "example.com");
}

#[tokio::test]
async fn invalid_config_is_rejected_at_construction() {
    let result = UpdateCycle::new(
        Box::new(FixedIpSource::new("192.0.2.10")),
        Box::new(MockDnsProvider::accepting()),
        &minimal_config(""),
    );

    assert!(result.is_err());
}

#[tokio::test]
async fn run_cycle_reports_failure_reason() {
    let (cycle, _event_rx) = UpdateCycle::new(
        Box::new(FixedIpSource::new("0.0.0.0")),
        Box::new(MockDnsProvider::rejecting()),
        &minimal_config("example.com"),
    )
    .expect("cycle construction succeeds");

    match cycle.run_cycle().await {
        CycleOutcome::PushFailed { address, reason } => {
            assert_eq!(address.as_str(), "0.0.0.0");
            assert!(
                reason.contains("400"),
                "reason carries the provider error: {}",
                reason
            );
        }
        other => panic!("expected PushFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn startup_emits_events_in_order() {
    let scheduler = ManualScheduler::new();

    let (cycle, mut event_rx) = UpdateCycle::new(
        Box::new(FixedIpSource::new("0.0.0.0")),
        Box::new(MockDnsProvider::accepting()),
        &minimal_config("example.com"),
    )
    .expect("cycle construction succeeds");

    assert!(Arc::new(cycle).start(&scheduler).await);

    match event_rx.recv().await {
        Some(EngineEvent::Started { zone, domain }) => {
            assert_eq!(zone, "example.com");
            assert_eq!(domain, "example.com");
        }
        other => panic!("expected Started, got {:?}", other),
    }

    match event_rx.recv().await {
        Some(EngineEvent::CycleFinished { outcome, .. }) => assert!(outcome.is_success()),
        other => panic!("expected CycleFinished, got {:?}", other),
    }

    assert_eq!(
        event_rx.recv().await,
        Some(EngineEvent::Scheduled {
            every: Duration::from_secs(300)
        })
    );
}
