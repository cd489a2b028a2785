mod config;
pub mod database;
pub mod store;

pub use config::{Config, PomodoroConfig, WindowMode};
pub use database::Database;
pub use store::{MemoryStore, SettingsStore, SettingsStoreExt};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/clockpro[-dev]/` based on CLOCKPRO_ENV.
///
/// Set CLOCKPRO_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CLOCKPRO_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("clockpro-dev")
    } else {
        base_dir.join("clockpro")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
