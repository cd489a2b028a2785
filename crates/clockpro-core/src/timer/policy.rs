use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_SECS: u64 = 25 * 60;
pub const DEFAULT_BREAK_SECS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Work => "work",
            Phase::Break => "break",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Phase lengths for a Pomodoro session. Fixed for the lifetime of the
/// session object; there is no way to change them per `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroPolicy {
    pub work_secs: u64,
    pub break_secs: u64,
}

impl PomodoroPolicy {
    pub fn new(work_secs: u64, break_secs: u64) -> Self {
        Self {
            work_secs,
            break_secs,
        }
    }

    /// Build from minute values as stored in the config file.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn from_minutes(work_min: u64, break_min: u64) -> Self {
        Self::new(work_min.saturating_mul(60), break_min.saturating_mul(60))
    }

    pub fn duration_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::Break => self.break_secs,
        }
    }

    /// Whole focus minutes credited for one completed work phase.
    pub fn focus_minutes(&self) -> u64 {
        self.work_secs / 60
    }
}

impl Default for PomodoroPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_SECS, DEFAULT_BREAK_SECS)
    }
}
