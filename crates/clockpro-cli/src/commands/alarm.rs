use std::sync::Arc;

use clap::Subcommand;
use clockpro_core::{parse_alarm_time, AlarmMatcher, Database};

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Add an alarm
    Add {
        /// Time of day, HH:MM or HH:MM:SS
        time: String,
        /// Label shown when the alarm fires
        #[arg(long, default_value = "")]
        label: String,
    },
    /// List alarms
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove an alarm
    Remove {
        /// Alarm id (from `alarm list`)
        id: String,
    },
    /// Arm or disarm an alarm
    Toggle {
        /// Alarm id (from `alarm list`)
        id: String,
    },
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Arc::new(Database::open()?);
    let mut alarms = AlarmMatcher::new(db);

    match action {
        AlarmAction::Add { time, label } => {
            let time_of_day = parse_alarm_time(&time)?;
            let entry = alarms.add(time_of_day, label)?;
            println!("{}", entry.id);
        }
        AlarmAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(alarms.list())?);
            } else if alarms.list().is_empty() {
                println!("no alarms");
            } else {
                for alarm in alarms.list() {
                    println!(
                        "{}  {}  {:<3}  {}",
                        alarm.id,
                        alarm.time_of_day.format("%H:%M:%S"),
                        if alarm.enabled { "on" } else { "off" },
                        alarm.label
                    );
                }
            }
        }
        AlarmAction::Remove { id } => {
            let removed = alarms.remove(id.parse()?)?;
            println!("removed {} {}", removed.short_time(), removed.label);
        }
        AlarmAction::Toggle { id } => {
            let enabled = alarms.toggle(id.parse()?)?;
            println!("{}", if enabled { "enabled" } else { "disabled" });
        }
    }
    Ok(())
}
