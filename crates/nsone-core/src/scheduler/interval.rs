// # Interval Scheduler
//
// Tokio-backed implementation of Scheduler.
//
// ## Behavior
//
// - One spawned task per registration, driven by a tokio interval
// - First tick fires one full period after registration
// - The task future is awaited inside the loop, so invocations never overlap
// - Missed ticks (a cycle that ran longer than the period) are skipped, the
//   schedule stays aligned to its original phase
//
// ## Shutdown
//
// `shutdown()` aborts every spawned task. Dropping the scheduler does the
// same, so no periodic work outlives its owner.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;
use tracing::{debug, warn};

use crate::traits::scheduler::{PeriodicTask, Scheduler};

/// Scheduler running each registered task on its own tokio interval
///
/// Must be used from within a tokio runtime: `schedule()` spawns.
#[derive(Debug, Default)]
pub struct IntervalScheduler {
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl IntervalScheduler {
    /// Create a scheduler with no registered tasks
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks still scheduled
    pub fn task_count(&self) -> usize {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Abort every scheduled task
    pub fn shutdown(&self) {
        let handles: Vec<_> = self
            .handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect();

        debug!("Stopping {} scheduled task(s)", handles.len());
        for handle in handles {
            handle.abort();
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&self, task: PeriodicTask, every: Duration) {
        if every.is_zero() {
            warn!("Refusing to schedule a task with a zero period");
            return;
        }

        let first_tick = Instant::now() + every;
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(first_tick, every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let mut ticks = IntervalStream::new(interval);
            while ticks.next().await.is_some() {
                task().await;
            }
        });

        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handle);
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::scheduler::TaskFuture;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: Arc<AtomicUsize>) -> PeriodicTask {
        Arc::new(move || -> TaskFuture {
            let counter = Arc::clone(&counter);
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let scheduler = IntervalScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(counting_task(counter.clone()), Duration::from_secs(300));

        tokio::time::sleep(Duration::from_secs(299)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_ticks() {
        let scheduler = IntervalScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(counting_task(counter.clone()), Duration::from_secs(60));
        assert_eq!(scheduler.task_count(), 1);

        scheduler.shutdown();
        assert_eq!(scheduler.task_count(), 0);

        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_zero_period_is_ignored() {
        let scheduler = IntervalScheduler::new();
        let counter = Arc::new(AtomicUsize::new(0));

        scheduler.schedule(counting_task(counter), Duration::ZERO);
        assert_eq!(scheduler.task_count(), 0);
    }
}
