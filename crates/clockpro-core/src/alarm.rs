//! One-shot wall-clock alarms.
//!
//! The matcher is ticked once per second with the current local time. An
//! enabled entry whose time equals the current second exactly fires once and
//! is disarmed. A second that is never ticked (host suspended, clock jump)
//! never matches, so its alarm does not fire.
//!
//! Entries are addressed by a stable [`AlarmId`]. Two entries with the same
//! time and label are still distinct.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::storage::{SettingsStore, SettingsStoreExt};

pub const ALARMS_KEY: &str = "alarms";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlarmId(Uuid);

impl AlarmId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AlarmId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AlarmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AlarmId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEntry {
    /// Entries saved before ids existed get a fresh one on load.
    #[serde(default)]
    pub id: AlarmId,
    #[serde(rename = "time", with = "hms")]
    pub time_of_day: NaiveTime,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl AlarmEntry {
    pub fn new(time_of_day: NaiveTime, label: impl Into<String>) -> Self {
        Self {
            id: AlarmId::new(),
            time_of_day: truncate_to_second(time_of_day),
            label: label.into(),
            enabled: true,
        }
    }

    /// `HH:MM`, as shown in alarm lists and notifications.
    pub fn short_time(&self) -> String {
        self.time_of_day.format("%H:%M").to_string()
    }
}

/// Parse `HH:MM` or `HH:MM:SS`. Seconds default to zero.
///
/// # Errors
/// Returns [`ValidationError::InvalidAlarmTime`] for anything else.
pub fn parse_alarm_time(input: &str) -> Result<NaiveTime, ValidationError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| ValidationError::InvalidAlarmTime(input.to_string()))
}

fn truncate_to_second(t: NaiveTime) -> NaiveTime {
    t.with_nanosecond(0).unwrap_or(t)
}

/// Owns the alarm collection and persists it through the settings store.
pub struct AlarmMatcher<S: SettingsStore> {
    store: Arc<S>,
    alarms: Vec<AlarmEntry>,
}

impl<S: SettingsStore> AlarmMatcher<S> {
    /// Load the saved alarms. Malformed entries are skipped. Entries saved
    /// without an id are given one, and the collection is written back so
    /// the id survives into the next load.
    pub fn new(store: Arc<S>) -> Self {
        let raw: Vec<Value> = store.get_or(ALARMS_KEY, Vec::new());
        let mut ids_assigned = 0usize;
        let alarms: Vec<AlarmEntry> = raw
            .into_iter()
            .filter_map(|value| {
                let had_id = value.get("id").is_some();
                match serde_json::from_value::<AlarmEntry>(value) {
                    Ok(entry) => {
                        if !had_id {
                            ids_assigned += 1;
                        }
                        Some(entry)
                    }
                    Err(e) => {
                        warn!(error = %e, "skipping malformed alarm");
                        None
                    }
                }
            })
            .collect();

        let matcher = Self { store, alarms };
        if ids_assigned > 0 {
            match matcher.save() {
                Ok(()) => info!(count = ids_assigned, "assigned ids to stored alarms"),
                Err(e) => warn!(error = %e, "failed to persist assigned alarm ids"),
            }
        }
        matcher
    }

    pub fn list(&self) -> &[AlarmEntry] {
        &self.alarms
    }

    pub fn get(&self, id: AlarmId) -> Option<&AlarmEntry> {
        self.alarms.iter().find(|a| a.id == id)
    }

    /// Add an enabled alarm and persist.
    ///
    /// # Errors
    /// Returns an error if the collection cannot be saved. The alarm stays
    /// in memory either way.
    pub fn add(&mut self, time_of_day: NaiveTime, label: impl Into<String>) -> Result<AlarmEntry> {
        let entry = AlarmEntry::new(time_of_day, label);
        self.alarms.push(entry.clone());
        self.save()?;
        Ok(entry)
    }

    /// Remove exactly the entry with `id`.
    ///
    /// # Errors
    /// [`ValidationError::UnknownAlarm`] if no entry has that id, or a
    /// persistence error.
    pub fn remove(&mut self, id: AlarmId) -> Result<AlarmEntry> {
        let idx = self
            .alarms
            .iter()
            .position(|a| a.id == id)
            .ok_or(ValidationError::UnknownAlarm(id))?;
        let removed = self.alarms.remove(idx);
        self.save()?;
        Ok(removed)
    }

    /// Arm or disarm the entry with `id`.
    ///
    /// # Errors
    /// [`ValidationError::UnknownAlarm`] if no entry has that id, or a
    /// persistence error.
    pub fn set_enabled(&mut self, id: AlarmId, enabled: bool) -> Result<()> {
        let entry = self
            .alarms
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ValidationError::UnknownAlarm(id))?;
        entry.enabled = enabled;
        self.save()
    }

    /// Flip the enabled flag; returns the new value.
    ///
    /// # Errors
    /// Same as [`AlarmMatcher::set_enabled`].
    pub fn toggle(&mut self, id: AlarmId) -> Result<bool> {
        let enabled = !self
            .get(id)
            .ok_or(ValidationError::UnknownAlarm(id))?
            .enabled;
        self.set_enabled(id, enabled)?;
        Ok(enabled)
    }

    /// Fire every enabled alarm set for exactly `now` (to the second) and
    /// disarm it. Persistence failures are logged, not returned: a tick
    /// must not fail.
    pub fn tick(&mut self, now: NaiveTime) -> Vec<Event> {
        let now = truncate_to_second(now);
        let mut events = Vec::new();
        for alarm in self.alarms.iter_mut() {
            if alarm.enabled && alarm.time_of_day == now {
                alarm.enabled = false;
                info!(id = %alarm.id, label = %alarm.label, "alarm fired");
                events.push(Event::AlarmFired {
                    alarm: alarm.clone(),
                });
            }
        }
        if !events.is_empty() {
            if let Err(e) = self.save() {
                warn!(error = %e, "failed to persist disarmed alarms");
            }
        }
        events
    }

    fn save(&self) -> Result<()> {
        self.store.put(ALARMS_KEY, &self.alarms)
    }
}

mod hms {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(de::Error::custom)
    }
}
