//! Polling state machine for the server-side data-ingestion job. The TUI
//! event loop drives it with the current instant; it owns its deadlines
//! and guarantees at most one schedule at a time.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::model::ProgressSnapshot;

pub const TICK_PERIOD: Duration = Duration::from_millis(1000);
pub const DRAIN_DELAY: Duration = Duration::from_millis(2000);

/// Where the poller gets its status samples. The TUI implements this over
/// the remote client; tests hand back canned snapshots.
pub trait ProgressSource {
    fn progress(&mut self) -> Result<ProgressSnapshot>;
}

enum State {
    Idle,
    Polling { next_tick: Instant },
    Draining { hide_at: Instant },
}

/// What the caller should do after a poll step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Unchanged,
    /// The drain delay elapsed: the gauge was hidden and the dependent
    /// status view should be refreshed.
    RefreshStatus,
}

pub struct ProgressPoller {
    state: State,
    display: Option<ProgressSnapshot>,
}

impl Default for ProgressPoller {
    fn default() -> Self {
        Self {
            state: State::Idle,
            display: None,
        }
    }
}

impl ProgressPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin polling. Any previous schedule is dropped first, so calling
    /// this twice leaves exactly one pending tick. The first tick fires
    /// immediately.
    pub fn start(&mut self, now: Instant) {
        self.state = State::Polling { next_tick: now };
        if self.display.is_none() {
            self.display = Some(ProgressSnapshot::default());
        }
    }

    pub fn cancel(&mut self) {
        self.state = State::Idle;
        self.display = None;
    }

    /// One-shot startup probe: if a job is already running, show its
    /// current progress and enter the polling state so a restart during an
    /// active job resumes tracking without user action.
    pub fn resume(&mut self, now: Instant, source: &mut dyn ProgressSource) {
        let Ok(snap) = source.progress() else {
            return;
        };
        if snap.is_running {
            self.display = Some(snap);
            self.state = State::Polling {
                next_tick: now + TICK_PERIOD,
            };
        }
    }

    /// Advance the state machine. Call this from the event loop on every
    /// iteration; it only does work when a deadline has passed.
    pub fn poll(&mut self, now: Instant, source: &mut dyn ProgressSource) -> PollOutcome {
        match self.state {
            State::Idle => PollOutcome::Unchanged,
            State::Polling { next_tick } => {
                if now < next_tick {
                    return PollOutcome::Unchanged;
                }
                match source.progress() {
                    Ok(snap) => {
                        let running = snap.is_running;
                        self.display = Some(snap);
                        if running {
                            self.state = State::Polling {
                                next_tick: now + TICK_PERIOD,
                            };
                        } else {
                            self.state = State::Draining {
                                hide_at: now + DRAIN_DELAY,
                            };
                        }
                    }
                    Err(_) => {
                        // The next scheduled tick is the retry.
                        self.state = State::Polling {
                            next_tick: now + TICK_PERIOD,
                        };
                    }
                }
                PollOutcome::Unchanged
            }
            State::Draining { hide_at } => {
                if now < hide_at {
                    return PollOutcome::Unchanged;
                }
                self.display = None;
                self.state = State::Idle;
                PollOutcome::RefreshStatus
            }
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    /// Gauge contents while the progress container is visible.
    pub fn display(&self) -> Option<&ProgressSnapshot> {
        self.display.as_ref()
    }
}

#[cfg(test)]
#[path = "tests/progress_tests.rs"]
mod tests;
