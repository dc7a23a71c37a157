use std::time::Duration;

use tokio::sync::watch;

use crate::schedule::Clock;

pub const PROGRESS_TICK: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingPhase {
    pub id: &'static str,
    pub text: &'static str,
    pub duration: Duration,
}

pub const PROCESSING_PHASES: &[ProcessingPhase] = &[
    ProcessingPhase {
        id: "analyze",
        text: "Analyzujeme váš cíl",
        duration: Duration::from_millis(800),
    },
    ProcessingPhase {
        id: "map",
        text: "Mapujeme příležitosti",
        duration: Duration::from_millis(900),
    },
    ProcessingPhase {
        id: "skills",
        text: "Vyhodnocujeme dovednosti",
        duration: Duration::from_millis(700),
    },
    ProcessingPhase {
        id: "plan",
        text: "Sestavujeme plán",
        duration: Duration::from_millis(850),
    },
    ProcessingPhase {
        id: "prepare",
        text: "Připravujeme osobní prostor",
        duration: Duration::from_millis(750),
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingSnapshot {
    pub phase_index: usize,
    pub phase_text: &'static str,
    /// 0.0 ..= 100.0
    pub progress: f32,
    pub complete: bool,
}

/// Fixed multi-phase animation shown while a submission is in flight.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingSequence {
    phases: &'static [ProcessingPhase],
}

impl Default for ProcessingSequence {
    fn default() -> Self {
        Self::new(PROCESSING_PHASES)
    }
}

impl ProcessingSequence {
    pub fn new(phases: &'static [ProcessingPhase]) -> Self {
        Self { phases }
    }

    pub fn total_duration(&self) -> Duration {
        self.phases.iter().map(|phase| phase.duration).sum()
    }

    pub fn initial(&self) -> ProcessingSnapshot {
        self.snapshot_at(Duration::ZERO)
    }

    /// Each phase owns an equal slice of the progress bar and fills it
    /// linearly over its own duration.
    pub fn snapshot_at(&self, elapsed: Duration) -> ProcessingSnapshot {
        let count = self.phases.len();
        let Some(last) = self.phases.last() else {
            return ProcessingSnapshot {
                phase_index: 0,
                phase_text: "",
                progress: 100.0,
                complete: true,
            };
        };

        let slice = 100.0 / count as f32;
        let mut phase_start = Duration::ZERO;
        for (index, phase) in self.phases.iter().enumerate() {
            let phase_end = phase_start + phase.duration;
            if elapsed < phase_end {
                let into = (elapsed - phase_start).as_secs_f32();
                let fraction = if phase.duration.is_zero() {
                    1.0
                } else {
                    (into / phase.duration.as_secs_f32()).min(1.0)
                };
                return ProcessingSnapshot {
                    phase_index: index,
                    phase_text: phase.text,
                    progress: slice * (index as f32 + fraction),
                    complete: false,
                };
            }
            phase_start = phase_end;
        }

        ProcessingSnapshot {
            phase_index: count - 1,
            phase_text: last.text,
            progress: 100.0,
            complete: true,
        }
    }

    /// Plays the sequence in `PROGRESS_TICK` steps, publishing every
    /// snapshot; returns once the last phase has elapsed.
    pub async fn run(&self, clock: &dyn Clock, updates: &watch::Sender<ProcessingSnapshot>) {
        let total = self.total_duration();
        let mut elapsed = Duration::ZERO;
        updates.send_replace(self.snapshot_at(elapsed));

        while elapsed < total {
            let step = PROGRESS_TICK.min(total - elapsed);
            clock.sleep(step).await;
            elapsed += step;
            updates.send_replace(self.snapshot_at(elapsed));
        }

        if total.is_zero() {
            updates.send_replace(self.snapshot_at(total));
        }
    }
}

#[cfg(test)]
#[path = "tests/processing_tests.rs"]
mod tests;
