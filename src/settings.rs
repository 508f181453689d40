//! Game settings
//!
//! Read from an optional JSON file on native builds; the browser build uses
//! the defaults. Gameplay constants are fixed and live in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("asset_root must not be empty")]
    EmptyAssetRoot,
}

/// Runtime preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    /// Don't blink the character while invincible
    pub reduced_motion: bool,
    /// Directory (or URL prefix) images are loaded from
    pub asset_root: String,
    /// Frame cap for headless runs
    pub max_frames: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            reduced_motion: false,
            asset_root: "assets".to_string(),
            // A full round is 12 500 frames at the nominal 16 ms
            max_frames: 20_000,
        }
    }
}

impl Settings {
    /// Parse and validate settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        if settings.asset_root.trim().is_empty() {
            return Err(SettingsError::EmptyAssetRoot);
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `path` if given, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::from_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// URL or path of an image
    pub fn asset_path(&self, file: &str) -> String {
        format!("{}/{}", self.asset_root.trim_end_matches('/'), file)
    }
}
