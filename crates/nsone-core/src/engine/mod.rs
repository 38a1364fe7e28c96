//! Update cycle engine
//!
//! The [`UpdateCycle`] is responsible for:
//! - Resolving the current public address via IpSource
//! - Pushing it to the DNS provider when one was resolved
//! - Reporting the combined result to the host
//! - Registering itself with the host's Scheduler after a good start
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────────┐
//!  Scheduler ───▶ │ UpdateCycle  │ ───▶ Events
//!   (tick)        └──────────────┘     (notify)
//!                         │
//!           ┌─────────────┴─────────────┐
//!           ▼                           ▼
//!   ┌─────────────┐             ┌──────────────┐
//!   │  IpSource   │             │ DnsProvider  │
//!   │ (resolve)   │             │ (push)       │
//!   └─────────────┘             └──────────────┘
//! ```
//!
//! ## Cycle Flow
//!
//! 1. Resolve the public address
//! 2. No address: stop, the cycle failed, the provider is never called
//! 3. Otherwise push the record and return the provider's verdict
//!
//! The startup cycle's result is the module's readiness signal. Periodic
//! cycles run on the scheduler and their result is discarded.

use crate::config::{DdnsConfig, RecordConfig};
use crate::error::Result;
use crate::traits::{
    DnsProvider, IpSource, PeriodicTask, ResolvedAddress, Scheduler, TaskFuture,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

/// Result of one update cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The provider accepted the new record
    Updated {
        /// The address that was pushed
        address: ResolvedAddress,
    },

    /// The IP source produced no address; nothing was pushed
    NoAddress,

    /// The provider rejected the update or could not be reached
    PushFailed {
        /// The address that was attempted
        address: ResolvedAddress,
        /// Why the push failed
        reason: String,
    },

    /// A periodic tick found another cycle still in flight
    Skipped,
}

impl CycleOutcome {
    /// The boolean the host sees
    pub fn is_success(&self) -> bool {
        matches!(self, CycleOutcome::Updated { .. })
    }
}

/// Events emitted by the UpdateCycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Startup cycle is about to run
    Started {
        zone: String,
        domain: String,
    },

    /// A cycle finished
    CycleFinished {
        outcome: CycleOutcome,
        finished_at: DateTime<Utc>,
    },

    /// Periodic cycles were registered with the scheduler
    Scheduled {
        every: Duration,
    },
}

/// One resolve-then-push update cycle bound to a fixed record
///
/// ## Lifecycle
///
/// 1. Create with [`UpdateCycle::new()`]
/// 2. Wrap in an `Arc` and call [`UpdateCycle::start()`] once
/// 3. On success, the scheduler keeps calling [`UpdateCycle::run_scheduled()`]
///
/// ## Single Flight
///
/// At most one cycle runs at a time per instance. [`UpdateCycle::run_once()`]
/// waits for a running cycle to finish; a scheduled tick that finds one in
/// flight is skipped instead.
pub struct UpdateCycle {
    /// Public address discovery
    ip_source: Box<dyn IpSource>,

    /// Record updater
    provider: Box<dyn DnsProvider>,

    /// Zone, domain and key every push uses
    record: RecordConfig,

    /// Scheduling period
    interval: Duration,

    /// Held for the duration of a cycle
    in_flight: Mutex<()>,

    /// Event sender for external monitoring
    event_tx: mpsc::Sender<EngineEvent>,
}

impl UpdateCycle {
    /// Create a new update cycle
    ///
    /// # Returns
    ///
    /// A tuple of (cycle, event_receiver) where event_receiver yields engine
    /// events. Dropping the receiver is fine; events are then discarded.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: &DdnsConfig,
    ) -> Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let record = config.record()?;
        let (tx, rx) = mpsc::channel(config.engine.event_channel_capacity);

        let cycle = Self {
            ip_source,
            provider,
            record,
            interval: config.engine.interval(),
            in_flight: Mutex::new(()),
            event_tx: tx,
        };

        Ok((cycle, rx))
    }

    /// The record this cycle keeps up to date
    pub fn record(&self) -> &RecordConfig {
        &self.record
    }

    /// The scheduling period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the startup cycle and, if it succeeds, schedule the periodic ones
    ///
    /// # Returns
    ///
    /// - `true`: the record was pushed; periodic cycles are registered
    /// - `false`: the startup cycle failed; nothing is registered
    pub async fn start(self: &Arc<Self>, scheduler: &dyn Scheduler) -> bool {
        self.emit_event(EngineEvent::Started {
            zone: self.record.zone.clone(),
            domain: self.record.domain.clone(),
        });

        if !self.run_once().await {
            warn!(
                "Initial update failed for {}/{}, not scheduling",
                self.record.zone, self.record.domain
            );
            return false;
        }

        let cycle = Arc::clone(self);
        let task: PeriodicTask = Arc::new(move || -> TaskFuture {
            let cycle = Arc::clone(&cycle);
            Box::pin(async move { cycle.run_scheduled().await })
        });
        scheduler.schedule(task, self.interval);

        info!(
            "Updating {}/{} every {:?}",
            self.record.zone, self.record.domain, self.interval
        );
        self.emit_event(EngineEvent::Scheduled {
            every: self.interval,
        });

        true
    }

    /// Run one cycle, waiting for any cycle already in flight
    ///
    /// # Returns
    ///
    /// `true` only when an address was resolved and the provider accepted it
    pub async fn run_once(&self) -> bool {
        let _guard = self.in_flight.lock().await;
        self.run_cycle().await.is_success()
    }

    /// Run one cycle on behalf of the scheduler
    ///
    /// The outcome is deliberately dropped: a failed periodic cycle is only
    /// visible through logs and events. Skips if a cycle is already running.
    pub async fn run_scheduled(&self) {
        let Ok(_guard) = self.in_flight.try_lock() else {
            debug!("Previous cycle still in flight, skipping this tick");
            self.finish(CycleOutcome::Skipped);
            return;
        };

        let _ = self.run_cycle().await;
    }

    /// Run one cycle without taking the single-flight guard
    ///
    /// Callers are responsible for not overlapping cycles.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let Some(address) = self.ip_source.resolve().await else {
            debug!(
                "No public address from {}, skipping push",
                self.ip_source.source_name()
            );
            return self.finish(CycleOutcome::NoAddress);
        };

        debug!("Resolved public address {}", address);

        let outcome = match self.provider.push(&self.record, &address).await {
            Ok(()) => {
                info!(
                    "Updated {}/{} -> {}",
                    self.record.zone, self.record.domain, address
                );
                CycleOutcome::Updated { address }
            }
            Err(e) => CycleOutcome::PushFailed {
                address,
                reason: e.to_string(),
            },
        };

        self.finish(outcome)
    }

    fn finish(&self, outcome: CycleOutcome) -> CycleOutcome {
        self.emit_event(EngineEvent::CycleFinished {
            outcome: outcome.clone(),
            finished_at: Utc::now(),
        });
        outcome
    }

    /// Emit an engine event
    fn emit_event(&self, event: EngineEvent) {
        if let Err(mpsc::error::TrySendError::Full(_)) = self.event_tx.try_send(event) {
            warn!("Event channel full, dropping event. Consider raising event_channel_capacity.");
        }
    }
}
