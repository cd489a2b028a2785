use serde::{Deserialize, Serialize};

use crate::alarm::AlarmEntry;
use crate::timer::Phase;

/// Every observable state change in a session or the alarm matcher
/// produces an Event. Sessions return them from `tick`; the coordinator
/// forwards them to whatever presents them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownUpdated {
        remaining_secs: u64,
    },
    CountdownFinished,
    StopwatchUpdated {
        elapsed_secs: u64,
    },
    PomodoroUpdated {
        remaining_secs: u64,
        phase: Phase,
    },
    /// A Pomodoro phase reached zero. `completed_work_phases` already
    /// includes the phase that just ended when `phase` is Work.
    PhaseCompleted {
        phase: Phase,
        completed_work_phases: u32,
        tag: Option<String>,
    },
    AlarmFired {
        alarm: AlarmEntry,
    },
}

impl Event {
    /// True for events that end a session or phase (as opposed to
    /// per-second updates).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Event::CountdownFinished | Event::PhaseCompleted { .. } | Event::AlarmFired { .. }
        )
    }
}

/// What a session's `tick` produced: the post-tick running flag plus the
/// events emitted during the tick, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tick {
    pub running: bool,
    pub events: Vec<Event>,
}

impl Tick {
    pub(crate) fn idle(running: bool) -> Self {
        Self {
            running,
            events: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::PomodoroUpdated {
            remaining_secs: 42,
            phase: Phase::Break,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PomodoroUpdated");
        assert_eq!(json["phase"], "break");
        assert_eq!(json["remaining_secs"], 42);
    }

    #[test]
    fn updates_are_not_terminal() {
        assert!(!Event::StopwatchUpdated { elapsed_secs: 1 }.is_terminal());
        assert!(Event::CountdownFinished.is_terminal());
    }
}
