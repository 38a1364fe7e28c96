// # Scheduler Trait
//
// The host's "run this every N minutes" service. The engine registers its
// periodic cycle here once, right after a successful startup cycle.
//
// ## Implementations
//
// - `IntervalScheduler`: tokio interval task per registration (production)
// - `ManualScheduler`: virtual clock advanced by the host (tests, embedders)

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Future produced by one invocation of a [`PeriodicTask`]
pub type TaskFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// A fire-and-forget action run on every tick
///
/// The scheduler discards whatever the action achieved; only its side effects
/// (HTTP calls, log lines) are observable.
pub type PeriodicTask = Arc<dyn Fn() -> TaskFuture + Send + Sync>;

/// Trait for periodic scheduling services
///
/// # Contract
///
/// - The first invocation happens one full period after registration
/// - Invocations of the same task never overlap
/// - The period never changes, whatever the task did
pub trait Scheduler: Send + Sync {
    /// Register `task` to run every `every`
    fn schedule(&self, task: PeriodicTask, every: Duration);
}
