//! Terminal-backed collaborators: alerts print to stdout and sounds ring the
//! terminal bell.

use std::io::Write;

use clockpro_core::{Notifier, SoundPlayer};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct Terminal;

impl Notifier for Terminal {
    fn show(&self, title: &str, message: &str) {
        println!("{title}");
        for line in message.lines().filter(|l| !l.trim().is_empty()) {
            println!("  {line}");
        }
    }
}

impl SoundPlayer for Terminal {
    fn play(&self, name: &str, looped: bool, progressive: bool) {
        debug!(name, looped, progressive, "bell");
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|()| out.flush()) {
            debug!(error = %e, "bell failed");
        }
    }

    fn stop(&self) {}
}
