pub mod config;
pub mod plan;

use std::path::Path;

use zonesched_core::Config;

/// Load from `path` when given, otherwise from the default location.
pub fn load_config(path: Option<&Path>) -> zonesched_core::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Save to `path` when given, otherwise to the default location.
pub fn save_config(config: &Config, path: Option<&Path>) -> zonesched_core::Result<()> {
    match path {
        Some(path) => config.save_to(path),
        None => config.save(),
    }
}
