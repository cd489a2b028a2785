//! One-second heartbeat shared by every session type.
//!
//! A `SessionClock` owns the `running`/`paused` pair and decides whether a
//! tick call counts. Sessions keep their own counters and only touch them
//! when [`SessionClock::advance`] lets a tick through, so session state is a
//! pure function of the ticks consumed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    running: bool,
    paused: bool,
    /// Ticks let through since the last `start`.
    consumed: u64,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn state(&self) -> ClockState {
        match (self.running, self.paused) {
            (false, _) => ClockState::Idle,
            (true, false) => ClockState::Running,
            (true, true) => ClockState::Paused,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.paused = false;
        self.consumed = 0;
    }

    /// Resume without forgetting consumed ticks.
    pub fn resume(&mut self) {
        self.running = true;
        self.paused = false;
    }

    /// Flips `paused`. Has no observable effect while not running.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn halt(&mut self) {
        self.running = false;
        self.paused = false;
    }

    /// Returns true when this tick should advance the owning session.
    pub fn advance(&mut self) -> bool {
        if self.running && !self.paused {
            self.consumed = self.consumed.saturating_add(1);
            true
        } else {
            false
        }
    }
}
