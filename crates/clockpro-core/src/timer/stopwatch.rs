//! Unbounded count-up stopwatch.
//!
//! Elapsed time is a `u64` second count and saturates instead of wrapping.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clock::{ClockState, SessionClock};
use crate::events::{Event, Tick};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stopwatch {
    clock: SessionClock,
    elapsed_secs: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn running(&self) -> bool {
        self.clock.running()
    }

    pub fn paused(&self) -> bool {
        self.clock.paused()
    }

    pub fn state(&self) -> ClockState {
        self.clock.state()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// `HH:MM:SS`
    pub fn formatted(&self) -> String {
        let (mins, secs) = (self.elapsed_secs / 60, self.elapsed_secs % 60);
        format!("{:02}:{:02}:{:02}", mins / 60, mins % 60, secs)
    }

    /// Start or resume. Never touches the elapsed counter.
    pub fn start(&mut self) {
        self.clock.resume();
    }

    pub fn pause(&mut self) {
        self.clock.toggle_pause();
    }

    /// Back to idle at zero. Emits a zero update so displays clear.
    pub fn reset(&mut self) -> Event {
        self.clock.halt();
        self.elapsed_secs = 0;
        debug!("stopwatch reset");
        Event::StopwatchUpdated { elapsed_secs: 0 }
    }

    pub fn tick(&mut self) -> Tick {
        if !self.clock.advance() {
            return Tick::idle(self.clock.running());
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        Tick {
            running: true,
            events: vec![Event::StopwatchUpdated {
                elapsed_secs: self.elapsed_secs,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_while_running() {
        let mut sw = Stopwatch::new();
        assert!(!sw.tick().running);
        sw.start();
        for _ in 0..5 {
            sw.tick();
        }
        assert_eq!(sw.elapsed_secs(), 5);
        assert_eq!(
            sw.tick().events,
            vec![Event::StopwatchUpdated { elapsed_secs: 6 }]
        );
    }

    #[test]
    fn start_while_running_keeps_counter() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.tick();
        sw.tick();
        sw.start();
        assert_eq!(sw.elapsed_secs(), 2);
    }

    #[test]
    fn start_resumes_from_pause() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.tick();
        sw.pause();
        assert!(sw.tick().events.is_empty());
        sw.start();
        assert_eq!(sw.state(), ClockState::Running);
        sw.tick();
        assert_eq!(sw.elapsed_secs(), 2);
    }

    #[test]
    fn reset_from_any_state_returns_to_zero() {
        let mut sw = Stopwatch::new();
        sw.start();
        sw.tick();
        sw.pause();
        assert_eq!(sw.reset(), Event::StopwatchUpdated { elapsed_secs: 0 });
        assert_eq!(sw.state(), ClockState::Idle);
        assert_eq!(sw.elapsed_secs(), 0);
    }

    #[test]
    fn formats_hours() {
        let mut sw = Stopwatch::new();
        sw.start();
        for _ in 0..3725 {
            sw.tick();
        }
        assert_eq!(sw.formatted(), "01:02:05");
    }
}
