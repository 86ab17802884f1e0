/// CLI configuration
use crate::error::{CliError, Result};
use cadence_client::ClientConfig;
use cadence_playback::PlayerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ClientConfig,

    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default = "default_favorites")]
    pub favorites: FavoritesSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoritesSettings {
    #[serde(default = "default_favorites_path")]
    pub path: PathBuf,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `cadence.toml` is optional.
    /// Environment variables override the file, e.g. `CADENCE_SERVER__URL`.
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
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (prefixed with CADENCE_)
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.player.volume) {
            return Err(CliError::Config(format!(
                "player.volume must be between 0.0 and 1.0, got {}",
                self.player.volume
            )));
        }

        if self.favorites.path.as_os_str().is_empty() {
            return Err(CliError::Config("favorites.path cannot be empty".into()));
        }

        Ok(())
    }
}

// Default values
fn default_favorites() -> FavoritesSettings {
    FavoritesSettings {
        path: default_favorites_path(),
    }
}

fn default_favorites_path() -> PathBuf {
    PathBuf::from("favorites.json")
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: ClientConfig::default(),
            player: PlayerConfig::default(),
            favorites: default_favorites(),
        }
    }
}
