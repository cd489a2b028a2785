//! Tick-count properties of the three session types.

use clockpro_core::{Countdown, Event, Phase, Pomodoro, PomodoroPolicy, Stopwatch};
use proptest::prelude::*;

fn phase_completions(events: &[Event]) -> Vec<(Phase, u32)> {
    events
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

proptest! {
    #[test]
    fn countdown_finishes_exactly_on_last_tick(d in 1u64..2_000) {
        let mut cd = Countdown::new();
        cd.start(d);
        let mut finishes = Vec::new();
        for i in 1..=d {
            let tick = cd.tick();
            if tick.events.contains(&Event::CountdownFinished) {
                finishes.push(i);
            }
        }
        prop_assert_eq!(finishes, vec![d]);
        prop_assert!(!cd.running());
        prop_assert_eq!(cd.remaining_secs(), 0);
        prop_assert!(cd.tick().events.is_empty());
    }

    #[test]
    fn stopwatch_counts_only_unpaused_ticks(n in 0u64..500, k_frac in 0.0f64..1.0) {
        let k = (n as f64 * k_frac) as u64;
        let mut sw = Stopwatch::new();
        sw.start();
        sw.pause();
        for _ in 0..k {
            sw.tick();
        }
        sw.pause();
        for _ in k..n {
            sw.tick();
        }
        prop_assert_eq!(sw.elapsed_secs(), n - k);
    }

    #[test]
    fn pomodoro_remaining_never_exceeds_phase_length(
        work in 1u64..50,
        brk in 1u64..50,
        ticks in 0usize..200,
    ) {
        let policy = PomodoroPolicy::new(work, brk);
        let mut p = Pomodoro::new(policy);
        p.start(None);
        for _ in 0..ticks {
            p.tick();
            prop_assert!(p.remaining_secs() <= policy.duration_secs(p.phase()));
        }
    }
}

#[test]
fn classic_pomodoro_completes_work_at_1500_and_break_at_1800() {
    let mut p = Pomodoro::default();
    p.start(Some("code".into()));

    let mut events = Vec::new();
    for _ in 0..1500 {
        events.extend(p.tick().events);
    }
    assert_eq!(phase_completions(&events), vec![(Phase::Work, 1)]);
    assert_eq!(p.phase(), Phase::Break);
    assert_eq!(p.remaining_secs(), 300);

    events.clear();
    for _ in 1500..1800 {
        events.extend(p.tick().events);
    }
    assert_eq!(phase_completions(&events), vec![(Phase::Break, 1)]);
    assert!(!p.running());
}

#[test]
fn skip_matches_natural_transition() {
    let mut natural = Pomodoro::new(PomodoroPolicy::new(5, 2));
    natural.start(Some("t".into()));
    let mut natural_events = Vec::new();
    for _ in 0..5 {
        natural_events.extend(natural.tick().events);
    }

    let mut skipped = Pomodoro::new(PomodoroPolicy::new(5, 2));
    skipped.start(Some("t".into()));
    skipped.tick();
    skipped.skip();
    let skipped_events = skipped.tick().events;

    assert_eq!(phase_completions(&natural_events), vec![(Phase::Work, 1)]);
    assert_eq!(phase_completions(&skipped_events), vec![(Phase::Work, 1)]);
    assert_eq!(natural.phase(), skipped.phase());
    assert_eq!(natural.remaining_secs(), skipped.remaining_secs());
    assert_eq!(
        natural.completed_work_phases(),
        skipped.completed_work_phases()
    );
}

#[test]
fn idle_sessions_ignore_ticks() {
    let mut cd = Countdown::new();
    cd.stop();
    assert!(cd.tick().events.is_empty());

    let mut sw = Stopwatch::new();
    assert!(sw.tick().events.is_empty());
    assert_eq!(sw.elapsed_secs(), 0);

    let mut p = Pomodoro::default();
    assert!(p.tick().events.is_empty());
    assert_eq!(p.completed_work_phases(), 0);
}
