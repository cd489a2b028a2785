//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a fresh temp dir, so
//! config, alarms and history never touch the real data directory.

use std::path::Path;
use std::process::{Command, Stdio};

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_clockpro"))
        .args(args)
        .env("HOME", home)
        .env_remove("CLOCKPRO_ENV")
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0);
    for cmd in ["timer", "stopwatch", "pomodoro", "clock", "alarm", "stats", "config"] {
        assert!(stdout.contains(cmd), "help is missing {cmd}");
    }
}

#[test]
fn test_config_defaults_and_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "sound"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Beep");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "pomodoro.work_minutes", "50"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "pomodoro.work_minutes"]);
    assert_eq!(stdout.trim(), "50");

    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "no_such_key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no_such_key"));
}

#[test]
fn test_alarm_add_list_remove() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["alarm", "add", "07:30", "--label", "wake"]);
    assert_eq!(code, 0);
    let id = stdout.trim().to_string();

    let (stdout, _, code) = run_cli(home.path(), &["alarm", "list", "--json"]);
    assert_eq!(code, 0);
    let alarms: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let alarms = alarms.as_array().unwrap();
    assert_eq!(alarms.len(), 1);
    assert_eq!(alarms[0]["id"], id.as_str());
    assert_eq!(alarms[0]["time"], "07:30:00");
    assert_eq!(alarms[0]["label"], "wake");
    assert_eq!(alarms[0]["enabled"], true);

    let (stdout, _, code) = run_cli(home.path(), &["alarm", "toggle", &id]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "disabled");

    let (_, _, code) = run_cli(home.path(), &["alarm", "remove", &id]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["alarm", "list"]);
    assert_eq!(stdout.trim(), "no alarms");
}

#[test]
fn test_alarm_rejects_bad_time() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["alarm", "add", "25:00"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid alarm time"));
}

#[test]
fn test_timer_rejects_negative_minutes() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["timer", "-1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("must not be negative"));
}

#[test]
fn test_zero_timer_finishes_after_one_tick() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["timer", "0", "--json"]);
    assert_eq!(code, 0);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "CountdownFinished");
}

#[test]
fn test_stats_start_empty_and_export_header() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["stats", "all"]);
    assert_eq!(code, 0);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["total_completed_work_phases"], 0);

    let out = home.path().join("history.csv");
    let (_, _, code) = run_cli(home.path(), &["stats", "export", out.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "date,tag,timestamp\n"
    );
}
