//! Tick coordinator.
//!
//! `ClockHub` owns one of each session, the alarm matcher and the statistics
//! aggregator, and is ticked once per second by its driver. It is the only
//! path from session events to statistics: a completed Work phase is
//! recorded here, never by the Pomodoro session itself.
//!
//! All mutation goes through `&mut self`, so a driver that owns the hub
//! serializes ticks and commands by construction.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, TimeDelta};
use tracing::{debug, warn};

use crate::alarm::AlarmMatcher;
use crate::events::Event;
use crate::notify::{Notifier, SoundPlayer};
use crate::storage::{Config, SettingsStore};
use crate::stats::StatsAggregator;
use crate::timer::{Countdown, Phase, Pomodoro, Stopwatch};

pub struct ClockHub<S: SettingsStore> {
    countdown: Countdown,
    stopwatch: Stopwatch,
    pomodoro: Pomodoro,
    alarms: AlarmMatcher<S>,
    stats: StatsAggregator<S>,
    notifier: Arc<dyn Notifier>,
    sound: Arc<dyn SoundPlayer>,
    sound_name: String,
    time_offset: TimeDelta,
    time_format_24h: bool,
}

impl<S: SettingsStore> ClockHub<S> {
    pub fn new(
        store: Arc<S>,
        config: &Config,
        notifier: Arc<dyn Notifier>,
        sound: Arc<dyn SoundPlayer>,
    ) -> Self {
        let policy = config.pomodoro_policy();
        Self {
            countdown: Countdown::new(),
            stopwatch: Stopwatch::new(),
            pomodoro: Pomodoro::new(policy),
            alarms: AlarmMatcher::new(store.clone()),
            stats: StatsAggregator::new(store, policy.focus_minutes()),
            notifier,
            sound,
            sound_name: config.sound.clone(),
            time_offset: TimeDelta::try_seconds(config.time_offset_secs).unwrap_or_default(),
            time_format_24h: config.time_format_24h,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn countdown_mut(&mut self) -> &mut Countdown {
        &mut self.countdown
    }

    pub fn stopwatch(&self) -> &Stopwatch {
        &self.stopwatch
    }

    pub fn stopwatch_mut(&mut self) -> &mut Stopwatch {
        &mut self.stopwatch
    }

    pub fn pomodoro(&self) -> &Pomodoro {
        &self.pomodoro
    }

    pub fn pomodoro_mut(&mut self) -> &mut Pomodoro {
        &mut self.pomodoro
    }

    pub fn alarms(&self) -> &AlarmMatcher<S> {
        &self.alarms
    }

    pub fn alarms_mut(&mut self) -> &mut AlarmMatcher<S> {
        &mut self.alarms
    }

    pub fn stats(&self) -> &StatsAggregator<S> {
        &self.stats
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// Local wall-clock time with the configured offset applied.
    pub fn now(&self) -> NaiveDateTime {
        let local = Local::now().naive_local();
        local.checked_add_signed(self.time_offset).unwrap_or(local)
    }

    /// `HH:MM:SS`, or `HH:MM:SS AM` in 12-hour mode.
    pub fn format_time(&self, at: NaiveDateTime) -> String {
        let fmt = if self.time_format_24h {
            "%H:%M:%S"
        } else {
            "%I:%M:%S %p"
        };
        at.format(fmt).to_string()
    }

    pub fn format_date(&self, at: NaiveDateTime) -> String {
        at.format("%d/%m - %A").to_string()
    }

    // ── Tick ─────────────────────────────────────────────────────────

    pub fn tick(&mut self) -> Vec<Event> {
        let now = self.now();
        self.tick_at(now)
    }

    /// Advance alarms and every session by one second at wall-clock `now`.
    /// Returns all events in order: alarms, countdown, stopwatch, Pomodoro.
    pub fn tick_at(&mut self, now: NaiveDateTime) -> Vec<Event> {
        let mut events = self.alarms.tick(now.time());
        events.extend(self.countdown.tick().events);
        events.extend(self.stopwatch.tick().events);
        events.extend(self.pomodoro.tick().events);

        for event in events.iter().filter(|e| e.is_terminal()) {
            self.dispatch(event, now);
        }
        events
    }

    fn dispatch(&mut self, event: &Event, now: NaiveDateTime) {
        match event {
            Event::AlarmFired { alarm } => {
                let label = if alarm.label.is_empty() {
                    "Alarm"
                } else {
                    alarm.label.as_str()
                };
                self.alert("🔔 Alarm!", &format!("{} - {label}", alarm.short_time()));
            }
            Event::CountdownFinished => {
                self.countdown.stop();
                self.alert("⏰ Timer", "Time's up!");
            }
            Event::PhaseCompleted {
                phase: Phase::Work,
                completed_work_phases,
                tag,
            } => {
                if let Err(e) = self.stats.record_at(tag.as_deref(), now) {
                    warn!(error = %e, "failed to persist completed pomodoro");
                }
                self.alert(
                    "🍅 Pomodoro",
                    &format!(
                        "Work done! Break time.\n{}\nTotal: {completed_work_phases} 🍅",
                        tag.as_deref().unwrap_or("")
                    ),
                );
            }
            Event::PhaseCompleted {
                phase: Phase::Break,
                ..
            } => {
                self.alert("🍅 Pomodoro", "Break over!");
            }
            _ => {}
        }
    }

    fn alert(&self, title: &str, message: &str) {
        debug!(title, "alert");
        self.sound.play(&self.sound_name, true, true);
        self.notifier.show(title, message);
        self.sound.stop();
    }
}
