use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;
mod terminal;

#[derive(Parser)]
#[command(
    name = "clockpro",
    version,
    about = "Clock Pro: countdown, stopwatch, Pomodoro and alarms"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a countdown in the foreground
    Timer(commands::timer::TimerArgs),
    /// Run a stopwatch in the foreground
    Stopwatch {
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Run one Pomodoro work/break cycle in the foreground
    Pomodoro {
        /// Tag recorded with the completed work phase
        #[arg(long)]
        tag: Option<String>,
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Show the wall clock and fire alarms
    Clock {
        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
    /// Alarm management
    Alarm {
        #[command(subcommand)]
        action: commands::alarm::AlarmAction,
    },
    /// Pomodoro statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer(args) => commands::timer::run(args).await,
        Commands::Stopwatch { json } => commands::stopwatch::run(json).await,
        Commands::Pomodoro { tag, json } => commands::pomodoro::run(tag, json).await,
        Commands::Clock { json } => commands::clock::run(json).await,
        Commands::Alarm { action } => commands::alarm::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise only warnings and errors reach stderr.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
