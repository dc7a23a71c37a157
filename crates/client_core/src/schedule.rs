//! Timer plumbing for the presentation layer.
//!
//! Everything timed sleeps through a [`Clock`]: the session's processing
//! animation and auto-advance await it directly, while the activity ticker
//! repeats on a [`Scheduler`]. Tests drive either with tokio's paused clock
//! or a recording fake.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use tokio::task::JoinHandle;

#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Handle to a spawned timer task; dropping it cancels the task.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[derive(Clone)]
pub struct Scheduler {
    clock: Arc<dyn Clock>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Arc::new(TokioClock))
    }
}

impl Scheduler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Runs `tick` after `first_delay`, then again after whatever delay the
    /// previous tick returned, until a tick returns `None` or the task is
    /// cancelled.
    pub fn every<F>(&self, first_delay: Duration, mut tick: F) -> ScheduledTask
    where
        F: FnMut() -> Option<Duration> + Send + 'static,
    {
        let clock = self.clock.clone();
        ScheduledTask {
            handle: tokio::spawn(async move {
                let mut delay = first_delay;
                loop {
                    clock.sleep(delay).await;
                    match tick() {
                        Some(next) => delay = next,
                        None => break,
                    }
                }
            }),
        }
    }
}

#[cfg(test)]
#[path = "tests/schedule_tests.rs"]
mod tests;
