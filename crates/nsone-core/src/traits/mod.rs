//! Core traits for the NS1 updater
//!
//! - [`IpSource`]: Discover the current public address
//! - [`DnsProvider`]: Push the address record to the DNS API
//! - [`Scheduler`]: Re-run the update cycle on a fixed period

pub mod ip_source;
pub mod dns_provider;
pub mod scheduler;

pub use ip_source::{IpSource, ResolvedAddress};
pub use dns_provider::DnsProvider;
pub use scheduler::{PeriodicTask, Scheduler, TaskFuture};
