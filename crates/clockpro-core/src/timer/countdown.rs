//! Single-phase countdown.
//!
//! ```text
//! Idle -> Running -> (Paused <-> Running) -> Finished -> Idle
//! ```
//!
//! `start` never emits anything; the finish event always comes out of a
//! `tick` call, even for a zero-length countdown.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{ClockState, SessionClock};
use crate::error::ValidationError;
use crate::events::{Event, Tick};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Countdown {
    clock: SessionClock,
    remaining_secs: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn running(&self) -> bool {
        self.clock.running()
    }

    pub fn paused(&self) -> bool {
        self.clock.paused()
    }

    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    /// `MM:SS`; minutes grow past two digits for long countdowns.
    pub fn formatted(&self) -> String {
        format_mm_ss(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or restart) counting down from `duration_secs`. Overwrites any
    /// session in progress.
    pub fn start(&mut self, duration_secs: u64) {
        self.remaining_secs = duration_secs;
        self.clock.start();
        debug!(duration_secs, "countdown started");
    }

    /// Start from a minutes/seconds pair entered by a user.
    ///
    /// # Errors
    /// Returns [`ValidationError::NegativeDuration`] if either part is negative.
    pub fn start_minutes_seconds(&mut self, minutes: i64, seconds: i64) -> Result<u64, ValidationError> {
        let secs = duration_from_parts(minutes, seconds)?;
        self.start(secs);
        Ok(secs)
    }

    /// Start from one of the configured presets (minutes).
    ///
    /// # Errors
    /// Returns [`ValidationError::OutOfBounds`] for an unknown preset index.
    pub fn start_preset(&mut self, presets: &[u32], index: usize) -> Result<u64, ValidationError> {
        let minutes = presets.get(index).ok_or_else(|| ValidationError::OutOfBounds {
            collection: "timer_presets".to_string(),
            index,
            len: presets.len(),
        })?;
        let secs = u64::from(*minutes) * 60;
        self.start(secs);
        Ok(secs)
    }

    pub fn pause(&mut self) {
        self.clock.toggle_pause();
    }

    pub fn stop(&mut self) {
        self.clock.halt();
        self.remaining_secs = 0;
    }

    /// Advance by one second. Returns the post-tick running flag and the
    /// events emitted (an update, a finish, or both).
    pub fn tick(&mut self) -> Tick {
        if !self.clock.advance() {
            return Tick::idle(self.clock.running());
        }

        let mut events = Vec::with_capacity(2);
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            events.push(Event::CountdownUpdated {
                remaining_secs: self.remaining_secs,
            });
        }
        if self.remaining_secs == 0 {
            self.clock.halt();
            info!(ticks = self.clock.consumed(), "countdown finished");
            events.push(Event::CountdownFinished);
        }

        Tick {
            running: self.clock.running(),
            events,
        }
    }
}

/// Combine a minutes/seconds pair into a second count.
///
/// # Errors
/// Negative parts are rejected rather than clamped to zero.
pub fn duration_from_parts(minutes: i64, seconds: i64) -> Result<u64, ValidationError> {
    if minutes < 0 {
        return Err(ValidationError::NegativeDuration {
            field: "minutes",
            value: minutes,
        });
    }
    if seconds < 0 {
        return Err(ValidationError::NegativeDuration {
            field: "seconds",
            value: seconds,
        });
    }
    Ok((minutes as u64).saturating_mul(60).saturating_add(seconds as u64))
}

pub(crate) fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
