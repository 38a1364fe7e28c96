// # nsone-core
//
// Core library for the NS1 dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the update cycle and the seams around it:
// - **IpSource**: Trait for discovering the current public address
// - **DnsProvider**: Trait for pushing the address record to the DNS API
// - **Scheduler**: Trait for the host's fixed-period callback service
// - **UpdateCycle**: Resolve → push → report, run once at startup and then
//   on every scheduler tick
//
// ## Design Principles
//
// 1. **Separation of Concerns**: The cycle knows nothing about HTTP; sources
//    and providers know nothing about scheduling
// 2. **No Hidden Retries**: A failed cycle waits for the next tick
// 3. **Boolean at the Edge**: Errors are typed inside, collapsed to pass/fail
//    only where the host looks
// 4. **Library-First**: The daemon is a thin host around this crate

pub mod traits;
pub mod engine;
pub mod scheduler;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{IpSource, DnsProvider, Scheduler, ResolvedAddress};
pub use engine::{CycleOutcome, EngineEvent, UpdateCycle};
pub use scheduler::{IntervalScheduler, ManualScheduler};
pub use config::{DdnsConfig, EngineConfig, RecordConfig};
pub use error::{Error, Result};
