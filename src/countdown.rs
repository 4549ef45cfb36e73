//! Restartable countdown that fires ticks on a fixed cadence.
//!
//! The countdown is a plain value driven by the host's measured elapsed time,
//! which keeps it deterministic under test. Cancelling is dropping it;
//! whoever owns one replaces it to restart.

use crate::constants::TIMER_TICK_MS;
use std::time::Duration;

/// What happened while advancing the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A tick boundary was crossed; `remaining` is measured at that boundary.
    Tick { remaining: Duration },
    /// The countdown reached zero. Emitted exactly once.
    Finished,
}

/// A one-shot countdown emitting a tick every `TIMER_TICK_MS` milliseconds.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: Duration,
    since_tick: Duration,
    finished: bool,
}

impl Countdown {
    pub fn new(length: Duration) -> Self {
        Self {
            remaining: length,
            since_tick: Duration::ZERO,
            finished: false,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume `elapsed` wall-clock time, reporting each tick boundary
    /// crossed and a final `Finished` when the countdown hits zero. Once
    /// finished, further calls report nothing.
    pub fn advance(&mut self, mut elapsed: Duration) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }
        if self.remaining.is_zero() {
            // Zero-length countdown: finish on the first advance.
            self.finished = true;
            events.push(CountdownEvent::Finished);
            return events;
        }

        let tick = Duration::from_millis(TIMER_TICK_MS);
        while !elapsed.is_zero() {
            let until_boundary = tick - self.since_tick;
            let step = elapsed.min(until_boundary).min(self.remaining);
            self.remaining -= step;
            self.since_tick += step;
            elapsed -= step;

            if self.remaining.is_zero() {
                self.finished = true;
                events.push(CountdownEvent::Finished);
                break;
            }
            if self.since_tick >= tick {
                self.since_tick = Duration::ZERO;
                events.push(CountdownEvent::Tick {
                    remaining: self.remaining,
                });
            }
        }
        events
    }
}
