use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Subcommand;
use clockpro_core::{Config, Database, StatsAggregator};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's stats
    Today,
    /// All-time stats
    All,
    /// Export the history as CSV
    Export {
        /// Destination file (replaced atomically)
        file: PathBuf,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Arc::new(Database::open()?);
    let stats = StatsAggregator::new(db, config.pomodoro_policy().focus_minutes());

    match action {
        StatsAction::Today => {
            let today = serde_json::json!({
                "date": Local::now().date_naive().to_string(),
                "completed": stats.today_count(),
                "last_7_days": stats.week_count(),
            });
            println!("{}", serde_json::to_string_pretty(&today)?);
        }
        StatsAction::All => {
            println!("{}", serde_json::to_string_pretty(&stats.report())?);
        }
        StatsAction::Export { file } => {
            stats.export_to_file(&file)?;
            println!(
                "exported {} records to {}",
                stats.history().len(),
                file.display()
            );
        }
    }
    Ok(())
}
