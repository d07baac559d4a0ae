//! Game and store settings, loaded from `hanoi.toml` at runtime.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::models::GameConfig;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("settings validation error: {0}")]
    Validation(String),
}

/// Which player store to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub pegs: usize,
    pub disks: usize,
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        let d = GameConfig::default();
        Self {
            pegs: d.pegs,
            disks: d.disks,
            seed: d.random_seed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub database_path: String,
    pub timeout_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_path: "hanoi.db".into(),
            timeout_ms: 5000,
        }
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub store: StoreSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.game.pegs == 0 {
            return Err(SettingsError::Validation("game.pegs must be > 0".into()));
        }
        if self.game.disks == 0 {
            return Err(SettingsError::Validation("game.disks must be > 0".into()));
        }
        if self.store.timeout_ms == 0 {
            return Err(SettingsError::Validation(
                "store.timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            pegs: self.game.pegs,
            disks: self.game.disks,
            random_seed: self.game.seed,
        }
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store.timeout_ms)
    }
}

/// Load and validate settings from a TOML file at the given path.
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let settings: Settings = toml::from_str(&content).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    settings.validate()?;
    Ok(settings)
}

/// Try well-known paths, returning defaults if none is found or usable.
pub fn load_default_settings() -> Settings {
    let candidates = ["hanoi.toml", "../hanoi.toml", "/etc/hanoi/hanoi.toml"];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_settings(p) {
                Ok(settings) => {
                    tracing::info!(path = %p.display(), "loaded settings");
                    return settings;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load settings");
                }
            }
        }
    }
    tracing::info!("no hanoi.toml found, using built-in defaults");
    Settings::default()
}
