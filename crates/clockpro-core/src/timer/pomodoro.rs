//! Two-phase Pomodoro session.
//!
//! ```text
//! Idle -> Work -> [pause <-> resume] -> Break -> [pause <-> resume] -> Idle
//! ```
//!
//! A phase ends on the tick that brings `remaining` to zero, or on the
//! first tick after `skip`. Either way the transition runs inside `tick`.
//! There is no separate tick spent sitting at zero: a 1500 s work phase
//! completes on tick 1500, not 1501.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::clock::{ClockState, SessionClock};
use super::policy::{Phase, PomodoroPolicy};
use crate::events::{Event, Tick};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pomodoro {
    policy: PomodoroPolicy,
    clock: SessionClock,
    phase: Phase,
    remaining_secs: u64,
    /// Work->Break transitions over this object's lifetime.
    completed_work_phases: u32,
    tag: Option<String>,
}

impl Pomodoro {
    pub fn new(policy: PomodoroPolicy) -> Self {
        Self {
            policy,
            clock: SessionClock::new(),
            phase: Phase::Work,
            remaining_secs: 0,
            completed_work_phases: 0,
            tag: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn policy(&self) -> PomodoroPolicy {
        self.policy
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

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_work_phases(&self) -> u32 {
        self.completed_work_phases
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn formatted(&self) -> String {
        super::countdown::format_mm_ss(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh work phase. Overwrites any run in progress; the
    /// completed-phase count is kept.
    pub fn start(&mut self, tag: Option<String>) {
        self.phase = Phase::Work;
        self.remaining_secs = self.policy.work_secs;
        self.tag = tag;
        self.clock.start();
        debug!(tag = ?self.tag, "pomodoro started");
    }

    pub fn pause(&mut self) {
        self.clock.toggle_pause();
    }

    /// End the current phase on the next tick. Emits nothing by itself.
    pub fn skip(&mut self) {
        self.remaining_secs = 0;
    }

    pub fn tick(&mut self) -> Tick {
        if !self.clock.advance() {
            return Tick::idle(self.clock.running());
        }

        let mut events = Vec::with_capacity(2);
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            events.push(Event::PomodoroUpdated {
                remaining_secs: self.remaining_secs,
                phase: self.phase,
            });
        }
        if self.remaining_secs == 0 {
            events.push(self.complete_phase());
        }

        Tick {
            running: self.clock.running(),
            events,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self) -> Event {
        let ended = self.phase;
        match ended {
            Phase::Work => {
                self.phase = Phase::Break;
                self.remaining_secs = self.policy.break_secs;
                self.completed_work_phases = self.completed_work_phases.saturating_add(1);
            }
            Phase::Break => self.clock.halt(),
        }
        info!(
            phase = %ended,
            completed = self.completed_work_phases,
            tag = ?self.tag,
            "pomodoro phase complete"
        );
        Event::PhaseCompleted {
            phase: ended,
            completed_work_phases: self.completed_work_phases,
            tag: self.tag.clone(),
        }
    }
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(PomodoroPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> Pomodoro {
        Pomodoro::new(PomodoroPolicy::new(3, 2))
    }

    fn completions(tick: &Tick) -> Vec<(Phase, u32)> {
        tick.events
            .iter()
            .filter_map(|e| match e {
                Event::PhaseCompleted {
                    phase,
                    completed_work_phases,
                    ..
                } => Some((*phase, *completed_work_phases)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn start_enters_work() {
        let mut p = short();
        p.start(Some("code".into()));
        assert_eq!(p.phase(), Phase::Work);
        assert_eq!(p.remaining_secs(), 3);
        assert_eq!(p.tag(), Some("code"));
        assert_eq!(p.state(), ClockState::Running);
    }

    #[test]
    fn work_then_break_then_idle() {
        let mut p = short();
        p.start(Some("code".into()));

        p.tick();
        p.tick();
        let end_of_work = p.tick();
        assert_eq!(completions(&end_of_work), vec![(Phase::Work, 1)]);
        assert_eq!(p.phase(), Phase::Break);
        assert_eq!(p.remaining_secs(), 2);
        assert!(end_of_work.running);

        p.tick();
        let end_of_break = p.tick();
        assert_eq!(completions(&end_of_break), vec![(Phase::Break, 1)]);
        assert!(!end_of_break.running);
        assert_eq!(p.tag(), Some("code"));
        assert_eq!(p.completed_work_phases(), 1);
    }

    #[test]
    fn update_events_carry_phase() {
        let mut p = short();
        p.start(None);
        let t = p.tick();
        assert_eq!(
            t.events,
            vec![Event::PomodoroUpdated {
                remaining_secs: 2,
                phase: Phase::Work
            }]
        );
    }

    #[test]
    fn skip_defers_transition_to_next_tick() {
        let mut p = short();
        p.start(None);
        p.tick();
        p.skip();
        assert_eq!(p.phase(), Phase::Work);
        assert_eq!(p.completed_work_phases(), 0);

        let t = p.tick();
        assert_eq!(t.events.len(), 1);
        assert_eq!(completions(&t), vec![(Phase::Work, 1)]);
        assert_eq!(p.remaining_secs(), 2);
    }

    #[test]
    fn skip_during_break_ends_session() {
        let mut p = short();
        p.start(None);
        p.skip();
        p.tick();
        p.skip();
        let t = p.tick();
        assert_eq!(completions(&t), vec![(Phase::Break, 1)]);
        assert!(!p.running());
    }

    #[test]
    fn skip_while_paused_waits_for_resume() {
        let mut p = short();
        p.start(None);
        p.pause();
        p.skip();
        assert!(p.tick().events.is_empty());
        p.pause();
        assert_eq!(completions(&p.tick()), vec![(Phase::Work, 1)]);
    }

    #[test]
    fn pause_applies_to_break_phase() {
        let mut p = short();
        p.start(None);
        p.skip();
        p.tick();
        p.pause();
        p.tick();
        assert_eq!(p.remaining_secs(), 2);
        assert_eq!(p.phase(), Phase::Break);
    }

    #[test]
    fn restart_replaces_tag_and_keeps_count() {
        let mut p = short();
        p.start(Some("a".into()));
        p.skip();
        p.tick();
        p.start(Some("b".into()));
        assert_eq!(p.phase(), Phase::Work);
        assert_eq!(p.tag(), Some("b"));
        assert_eq!(p.completed_work_phases(), 1);
        p.skip();
        assert_eq!(completions(&p.tick()), vec![(Phase::Work, 2)]);
    }

    #[test]
    fn idle_tick_reports_not_running() {
        let mut p = Pomodoro::default();
        let t = p.tick();
        assert!(!t.running);
        assert!(t.events.is_empty());
    }
}
