use clap::Args;
use clockpro_core::Config;
use tracing::info;

use crate::session::{self, Foreground};

#[derive(Args, Debug)]
pub struct TimerArgs {
    /// Minutes to count down
    #[arg(allow_negative_numbers = true, required_unless_present = "preset")]
    pub minutes: Option<i64>,
    /// Extra seconds on top of the minutes
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub seconds: i64,
    /// Start from a configured preset (index into timer_presets)
    #[arg(long, conflicts_with_all = ["minutes", "seconds"])]
    pub preset: Option<usize>,
    /// Print events as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: TimerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut hub = super::open_hub(&config, args.json)?;

    let secs = match args.preset {
        Some(index) => hub
            .countdown_mut()
            .start_preset(&config.timer_presets, index)?,
        None => hub
            .countdown_mut()
            .start_minutes_seconds(args.minutes.unwrap_or(0), args.seconds)?,
    };
    info!(secs, "timer started");

    session::drive(hub, Foreground::Countdown, args.json).await
}
