// # Manual Scheduler
//
// Virtual-clock implementation of Scheduler.
//
// ## Purpose
//
// Nothing runs until the owner calls `advance()`. The clock starts at zero
// when the scheduler is created; each registered task becomes due one period
// after the clock value at registration and then every period after that.
//
// ## When to Use
//
// - Tests that need to fire "time changed" deterministically
// - Hosts that already own a clock and want to drive the cycle themselves

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use crate::traits::scheduler::{PeriodicTask, Scheduler};

struct ManualEntry {
    every: Duration,
    next_due: Duration,
    task: PeriodicTask,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    entries: Vec<ManualEntry>,
}

/// Scheduler whose clock only moves when told to
///
/// # Example
///
/// ```rust
/// use nsone_core::scheduler::ManualScheduler;
/// use nsone_core::traits::{PeriodicTask, Scheduler, TaskFuture};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let scheduler = ManualScheduler::new();
/// let task: PeriodicTask = Arc::new(|| -> TaskFuture { Box::pin(async {}) });
/// scheduler.schedule(task, Duration::from_secs(300));
///
/// // Runs the task once
/// assert_eq!(scheduler.advance(Duration::from_secs(300)).await, 1);
/// # }
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    /// Create a scheduler with its clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of the virtual clock
    pub fn elapsed(&self) -> Duration {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).now
    }

    /// Periods of every registered task, in registration order
    pub fn periods(&self) -> Vec<Duration> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|entry| entry.every)
            .collect()
    }

    /// Move the clock forward by `by` and run every task that became due
    ///
    /// A task that fell behind by several periods runs once per period, in
    /// order, each invocation awaited before the next one starts.
    ///
    /// # Returns
    ///
    /// The number of task invocations performed
    pub async fn advance(&self, by: Duration) -> usize {
        let now = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.now += by;
            state.now
        };

        let mut invocations = 0;
        loop {
            // Collect under the lock, run without it
            let due: Vec<PeriodicTask> = {
                let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                state
                    .entries
                    .iter_mut()
                    .filter(|entry| entry.next_due <= now)
                    .map(|entry| {
                        entry.next_due += entry.every;
                        entry.task.clone()
                    })
                    .collect()
            };

            if due.is_empty() {
                break;
            }

            for task in due {
                task().await;
                invocations += 1;
            }
        }

        debug!("Virtual clock at {:?}, {} invocation(s)", now, invocations);
        invocations
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, task: PeriodicTask, every: Duration) {
        if every.is_zero() {
            warn!("Refusing to schedule a task with a zero period");
            return;
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let next_due = state.now + every;
        state.entries.push(ManualEntry {
            every,
            next_due,
            task,
        });
    }
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("elapsed", &self.elapsed())
            .field("periods", &self.periods())
            .finish()
    }
}
