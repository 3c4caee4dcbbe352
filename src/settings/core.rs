//! Core settings data structure and persistence

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::defaults::*;
use crate::error::{AppError, AppResult};

const SETTINGS_DIR: &str = ".sc_highgui";
const SETTINGS_FILE: &str = "settings.json";

/// Bitmap window sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Logical client width before DPI scaling.
    #[serde(default = "default_logical_width")]
    pub logical_width: i32,
    #[serde(default = "default_logical_height")]
    pub logical_height: i32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            logical_width: default_logical_width(),
            logical_height: default_logical_height(),
        }
    }
}

/// Parameters a fresh `VideoCapture` requests, and which backends it may pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureSettings {
    #[serde(default = "default_frame_width")]
    pub default_width: u32,
    #[serde(default = "default_frame_height")]
    pub default_height: u32,
    #[serde(default = "default_fps")]
    pub default_fps: u32,
    /// Register the test-pattern source.
    #[serde(default = "default_synthetic_source")]
    pub synthetic_source: bool,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            default_width: default_frame_width(),
            default_height: default_frame_height(),
            default_fps: default_fps(),
            synthetic_source: default_synthetic_source(),
        }
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub capture: CaptureSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            window: WindowSettings::default(),
            capture: CaptureSettings::default(),
        }
    }
}

impl Settings {
    /// Settings file path: `%USERPROFILE%` first, then `$HOME`, else next to the executable.
    pub fn settings_path() -> PathBuf {
        let home = std::env::var_os("USERPROFILE").or_else(|| std::env::var_os("HOME"));
        match home {
            Some(home) => {
                let mut path = PathBuf::from(home);
                path.push(SETTINGS_DIR);
                path.push(SETTINGS_FILE);
                path
            }
            None => {
                let mut path = std::env::current_exe().unwrap_or_default();
                path.set_file_name(SETTINGS_FILE);
                path
            }
        }
    }

    /// Load from the default location.
    pub fn load() -> Self {
        Self::load_from(&Self::settings_path())
    }

    /// Load from `path`. A missing or malformed file yields defaults, which are then written
    /// back best-effort.
    pub fn load_from(path: &Path) -> Self {
        match Self::read_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::debug!(path = %path.display(), "using default settings: {e}");
                let settings = Self::default();
                if let Err(e) = settings.save_to(path) {
                    tracing::warn!(path = %path.display(), "failed to write default settings: {e}");
                }
                settings
            }
        }
    }

    /// Strict read: I/O and parse errors are returned.
    pub fn read_from(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Save to the default location.
    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::settings_path())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
