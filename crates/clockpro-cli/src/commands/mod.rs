pub mod alarm;
pub mod clock;
pub mod config;
pub mod pomodoro;
pub mod stats;
pub mod stopwatch;
pub mod timer;

use std::sync::Arc;

use clockpro_core::{ClockHub, Config, Database, LogNotifier, Notifier, Silent, SoundPlayer};

use crate::terminal::Terminal;

/// Hub backed by the on-disk database. JSON output keeps stdout
/// machine-readable, so alerts go to the log and no bell is rung.
pub(crate) fn open_hub(
    config: &Config,
    json: bool,
) -> Result<ClockHub<Database>, Box<dyn std::error::Error>> {
    let db = Arc::new(Database::open()?);
    let (notifier, sound): (Arc<dyn Notifier>, Arc<dyn SoundPlayer>) = if json {
        (Arc::new(LogNotifier), Arc::new(Silent))
    } else {
        (Arc::new(Terminal), Arc::new(Terminal))
    };
    Ok(ClockHub::new(db, config, notifier, sound))
}
