mod clock;
mod countdown;
mod policy;
mod pomodoro;
mod stopwatch;

pub use clock::{ClockState, SessionClock};
pub use countdown::{duration_from_parts, Countdown};
pub use policy::{Phase, PomodoroPolicy, DEFAULT_BREAK_SECS, DEFAULT_WORK_SECS};
pub use pomodoro::Pomodoro;
pub use stopwatch::Stopwatch;
