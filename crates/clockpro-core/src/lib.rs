//! # Clock Pro Core Library
//!
//! Core logic for the Clock Pro productivity timer: a countdown, a
//! stopwatch, a Pomodoro work/break cycle, one-shot alarms and Pomodoro
//! statistics. Front-ends (the `clockpro` CLI, or any GUI) drive it by
//! calling `tick()` once per second.
//!
//! ## Architecture
//!
//! - **Sessions**: tick-driven state machines sharing a one-second
//!   [`SessionClock`]. No threads, no wall-clock reads; a session's state is
//!   a function of the ticks it has consumed.
//! - **Alarms**: exact-second matching against local wall-clock time.
//! - **Statistics**: history of completed work phases with running totals,
//!   windowed counts and CSV export.
//! - **Storage**: a key/value [`SettingsStore`] (SQLite or in-memory) and a
//!   TOML [`Config`].
//! - **Hub**: [`ClockHub`] ties the pieces together for a driver.

pub mod alarm;
pub mod error;
pub mod events;
pub mod hub;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod timer;

pub use alarm::{parse_alarm_time, AlarmEntry, AlarmId, AlarmMatcher};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::{Event, Tick};
pub use hub::ClockHub;
pub use notify::{LogNotifier, Notifier, Recorded, Recorder, Silent, SoundPlayer};
pub use stats::{HistoryRecord, StatsAggregator, StatsReport, StatsSummary};
pub use storage::{Config, Database, MemoryStore, SettingsStore, SettingsStoreExt, WindowMode};
pub use timer::{
    duration_from_parts, ClockState, Countdown, Phase, Pomodoro, PomodoroPolicy, SessionClock,
    Stopwatch,
};
