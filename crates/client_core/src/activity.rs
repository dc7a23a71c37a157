//! Decorative "live activity" line shown beside the form.

use std::time::Duration;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tokio::sync::watch;

use crate::schedule::{ScheduledTask, Scheduler};

pub const ROTATION_INTERVAL_MIN: Duration = Duration::from_millis(6000);
pub const ROTATION_INTERVAL_MAX: Duration = Duration::from_millis(8000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivityItem {
    pub avatar: &'static str,
    pub role: &'static str,
    pub action: &'static str,
}

pub const ACTIVITY_ITEMS: &[ActivityItem] = &[
    ActivityItem {
        avatar: "👨‍💻",
        role: "Backend Engineer",
        action: "dokončil kariérní plán",
    },
    ActivityItem {
        avatar: "👩‍🎨",
        role: "Frontend Developer",
        action: "zahájil trénink",
    },
    ActivityItem {
        avatar: "🧑‍💼",
        role: "Product Manager",
        action: "přešel do IT",
    },
    ActivityItem {
        avatar: "👨‍🔬",
        role: "Data Analyst",
        action: "dosáhl milníku",
    },
    ActivityItem {
        avatar: "👩‍💻",
        role: "Fullstack Developer",
        action: "získal certifikaci",
    },
    ActivityItem {
        avatar: "🧑‍🎓",
        role: "Junior Developer",
        action: "dokončil 1. modul",
    },
    ActivityItem {
        avatar: "👨‍🏫",
        role: "DevOps Engineer",
        action: "splnil výzvu",
    },
    ActivityItem {
        avatar: "👩‍🔧",
        role: "Mobile Developer",
        action: "aktualizoval plán",
    },
];

pub const SCORE_UPDATES: &[&str] = &[
    "Interview Readiness +6",
    "Technical Skills +4",
    "Portfolio Score +8",
    "Learning Progress +12",
    "Career Match +5",
    "Skill Coverage +7",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityFrame {
    pub item: ActivityItem,
    pub score: &'static str,
}

/// Walks a shuffled copy of [`ACTIVITY_ITEMS`], reshuffling after every full
/// pass. The first item of a fresh pass never repeats the last one shown.
pub struct ActivityRotation<R = StdRng> {
    rng: R,
    queue: Vec<usize>,
    position: usize,
    score: usize,
}

impl ActivityRotation<StdRng> {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for ActivityRotation<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ActivityRotation<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let mut queue: Vec<usize> = (0..ACTIVITY_ITEMS.len()).collect();
        queue.shuffle(&mut rng);
        Self {
            rng,
            queue,
            position: 0,
            score: 0,
        }
    }

    pub fn current(&self) -> ActivityFrame {
        ActivityFrame {
            item: ACTIVITY_ITEMS[self.queue[self.position]],
            score: SCORE_UPDATES[self.score],
        }
    }

    pub fn rotate(&mut self) -> ActivityFrame {
        let next = self.position + 1;
        if next >= self.queue.len() {
            let last_shown = self.queue[self.position];
            self.queue.shuffle(&mut self.rng);
            if self.queue.len() > 1 && self.queue[0] == last_shown {
                self.queue.swap(0, 1);
            }
            self.position = 0;
        } else {
            self.position = next;
        }
        self.score = (self.score + 1) % SCORE_UPDATES.len();
        self.current()
    }

    /// Random delay in `[ROTATION_INTERVAL_MIN, ROTATION_INTERVAL_MAX)`.
    pub fn next_interval(&mut self) -> Duration {
        let min = ROTATION_INTERVAL_MIN.as_millis() as u64;
        let max = ROTATION_INTERVAL_MAX.as_millis() as u64;
        Duration::from_millis(self.rng.gen_range(min..max))
    }
}

/// Runs an [`ActivityRotation`] on a scheduler until dropped.
pub struct ActivityTicker {
    frames: watch::Receiver<ActivityFrame>,
    _task: ScheduledTask,
}

impl ActivityTicker {
    pub fn start<R>(scheduler: &Scheduler, mut rotation: ActivityRotation<R>) -> Self
    where
        R: Rng + Send + 'static,
    {
        let (tx, frames) = watch::channel(rotation.current());
        let first_delay = rotation.next_interval();
        let task = scheduler.every(first_delay, move || {
            tx.send_replace(rotation.rotate());
            Some(rotation.next_interval())
        });
        Self {
            frames,
            _task: task,
        }
    }

    pub fn current(&self) -> ActivityFrame {
        *self.frames.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ActivityFrame> {
        self.frames.clone()
    }
}

#[cfg(test)]
#[path = "tests/activity_tests.rs"]
mod tests;
