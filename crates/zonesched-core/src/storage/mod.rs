mod config;

pub use config::{Config, EngineSection, ProfilesSection};

use std::path::PathBuf;

/// Returns `~/.config/zonesched[-dev]/` based on ZONESCHED_ENV.
///
/// Set ZONESCHED_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("ZONESCHED_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("zonesched-dev")
    } else {
        base_dir.join("zonesched")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
