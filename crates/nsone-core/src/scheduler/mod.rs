// # Scheduler Implementations
//
// This module provides implementations of the Scheduler trait for
// different timing models.

pub mod interval;
pub mod manual;

pub use interval::IntervalScheduler;
pub use manual::ManualScheduler;
