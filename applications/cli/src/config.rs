/// Application configuration
use crate::error::{CliError, Result};
use echo_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, read from the working directory if present
pub const DEFAULT_CONFIG_FILE: &str = "echo.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// JSON file holding the song catalog
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// Directory for device-scoped lists (top played, favorites)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Simulate a browser autoplay policy
    #[serde(default)]
    pub block_autoplay: bool,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `echo.toml` is used when
    /// present. Environment variables prefixed with `ECHO_` override file
    /// values, with `__` separating nested keys
    /// (`ECHO_PLAYBACK__RECENT_CAPACITY=20`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ECHO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.recent_capacity == 0 {
            return Err(CliError::Config(
                "playback.recent_capacity must be at least 1".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.playback.initial_volume) {
            return Err(CliError::Config(format!(
                "playback.initial_volume must be between 0.0 and 1.0, got {}",
                self.playback.initial_volume
            )));
        }

        Ok(())
    }
}

// Default values
fn default_catalog() -> PathBuf {
    PathBuf::from("catalog.json")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            data_dir: default_data_dir(),
            block_autoplay: false,
            playback: PlaybackConfig::default(),
        }
    }
}
