mod config;
pub mod snapshot;
pub mod store;

pub use config::{Config, DefaultsConfig};
pub use store::{JsonFileStore, MemoryStore, StateStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Blob name holding works, progress logs and the fitness profile.
pub const TIMETABLE_STORE: &str = "timetable";

/// Blob name holding the signed-in user and app settings.
pub const AUTH_STORE: &str = "auth";

/// Returns `~/.config/timetable[-dev]/` based on TIMETABLE_ENV.
///
/// Set TIMETABLE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMETABLE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timetable-dev")
    } else {
        base_dir.join("timetable")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDirFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
