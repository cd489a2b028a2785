//! Foreground driver.
//!
//! One task owns the hub. Ticks, stdin controls and Ctrl-C all arrive
//! through a single `select!`, so every mutation of the hub is serialized.

use std::time::Duration;

use clockpro_core::{ClockHub, Database, Event};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, Instant};
use tracing::debug;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Foreground {
    Countdown,
    Stopwatch,
    Pomodoro,
    Clock,
}

impl Foreground {
    fn finished(self, hub: &ClockHub<Database>) -> bool {
        match self {
            Foreground::Countdown => !hub.countdown().running(),
            Foreground::Pomodoro => !hub.pomodoro().running(),
            Foreground::Stopwatch | Foreground::Clock => false,
        }
    }
}

/// A line typed on stdin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Pause,
    Skip,
    Reset,
    Quit,
}

impl Control {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" => Some(Control::Pause),
            "s" | "skip" => Some(Control::Skip),
            "r" | "reset" => Some(Control::Reset),
            "q" | "quit" => Some(Control::Quit),
            _ => None,
        }
    }
}

pub async fn drive(
    mut hub: ClockHub<Database>,
    mode: Foreground,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut ticker = time::interval_at(Instant::now() + TICK, TICK);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = hub.now();
                for event in hub.tick_at(now) {
                    print_event(&event, json)?;
                }
                if mode == Foreground::Clock && !json {
                    println!("{}  {}", hub.format_time(now), hub.format_date(now));
                }
                if mode.finished(&hub) {
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    stdin_open = false;
                    continue;
                };
                match Control::parse(&line) {
                    Some(Control::Quit) => break,
                    Some(control) => {
                        if let Some(event) = apply(&mut hub, mode, control) {
                            print_event(&event, json)?;
                        }
                    }
                    None => debug!(line = %line.trim(), "ignored input"),
                }
            }
            res = &mut ctrl_c => {
                res?;
                break;
            }
        }
    }
    Ok(())
}

fn apply(hub: &mut ClockHub<Database>, mode: Foreground, control: Control) -> Option<Event> {
    match (mode, control) {
        (Foreground::Countdown, Control::Pause) => hub.countdown_mut().pause(),
        (Foreground::Stopwatch, Control::Pause) => {
            let sw = hub.stopwatch_mut();
            if sw.running() {
                sw.pause();
            } else {
                sw.start();
            }
        }
        (Foreground::Stopwatch, Control::Reset) => return Some(hub.stopwatch_mut().reset()),
        (Foreground::Pomodoro, Control::Pause) => hub.pomodoro_mut().pause(),
        (Foreground::Pomodoro, Control::Skip) => hub.pomodoro_mut().skip(),
        (mode, control) => debug!(?mode, ?control, "control not applicable"),
    }
    None
}

fn print_event(event: &Event, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else if let Some(line) = render(event) {
        println!("{line}");
    }
    Ok(())
}

/// Text for per-second updates. Terminal events reach the user through the
/// notifier instead.
fn render(event: &Event) -> Option<String> {
    match event {
        Event::CountdownUpdated { remaining_secs } => Some(mm_ss(*remaining_secs)),
        Event::StopwatchUpdated { elapsed_secs } => {
            let (mins, secs) = (elapsed_secs / 60, elapsed_secs % 60);
            Some(format!("{:02}:{:02}:{:02}", mins / 60, mins % 60, secs))
        }
        Event::PomodoroUpdated {
            remaining_secs,
            phase,
        } => Some(format!("{phase:<5} {}", mm_ss(*remaining_secs))),
        _ => None,
    }
}

fn mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
