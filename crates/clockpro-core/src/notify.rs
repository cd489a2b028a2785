//! Notification and sound collaborators.
//!
//! Both are fire-and-forget. Implementations swallow and log their own
//! failures; nothing they do can reach session tick logic.

use std::sync::Mutex;

use tracing::{debug, info};

pub trait Notifier {
    fn show(&self, title: &str, message: &str);
}

pub trait SoundPlayer {
    /// `progressive` ramps the volume up while looping.
    fn play(&self, name: &str, looped: bool, progressive: bool);

    fn stop(&self);
}

/// Writes notifications to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, title: &str, message: &str) {
        info!(title, message, "notification");
    }
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundPlayer for Silent {
    fn play(&self, name: &str, looped: bool, progressive: bool) {
        debug!(name, looped, progressive, "sound requested (silent)");
    }

    fn stop(&self) {}
}

/// Everything the recorder saw, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Notification { title: String, message: String },
    Play { name: String, looped: bool, progressive: bool },
    Stop,
}

/// Captures collaborator calls. Useful for tests and for front-ends that
/// render notifications themselves.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Mutex<Vec<Recorded>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn take(&self) -> Vec<Recorded> {
        self.calls
            .lock()
            .map(|mut calls| std::mem::take(&mut *calls))
            .unwrap_or_default()
    }

    fn push(&self, call: Recorded) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Notifier for Recorder {
    fn show(&self, title: &str, message: &str) {
        self.push(Recorded::Notification {
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl SoundPlayer for Recorder {
    fn play(&self, name: &str, looped: bool, progressive: bool) {
        self.push(Recorded::Play {
            name: name.to_string(),
            looped,
            progressive,
        });
    }

    fn stop(&self) {
        self.push(Recorded::Stop);
    }
}
