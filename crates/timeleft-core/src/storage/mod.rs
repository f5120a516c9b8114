mod config;
mod preferences;

pub use config::{ClockConfig, Config, DefaultsConfig};
pub use preferences::{PreferenceStore, Theme, SCHEDULE_KEY, THEME_KEY};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `TIMELEFT_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/timeleft[-dev]/`, with the `-dev` suffix when `TIMELEFT_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("TIMELEFT_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TIMELEFT_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("timeleft-dev")
            } else {
                base_dir.join("timeleft")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
