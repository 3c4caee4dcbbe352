//! ConfigManager - cached settings shared across the process
//!
//! # Usage
//! ```ignore
//! use sc_highgui::config::ConfigManager;
//!
//! let width = ConfigManager::global().logical_size().0;
//! ConfigManager::global().reload();
//! ```

use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::AppResult;
use crate::settings::Settings;

/// Settings change callback
pub type ConfigWatcher = Box<dyn Fn(&Settings) + Send + Sync>;

/// Settings cache bound to one settings file.
///
/// Readers get clones so the lock is never held across caller code. Watchers run after every
/// reload or update.
pub struct ConfigManager {
    path: PathBuf,
    settings: RwLock<Settings>,
    watchers: RwLock<Vec<ConfigWatcher>>,
}

static GLOBAL: OnceLock<ConfigManager> = OnceLock::new();

impl ConfigManager {
    /// Manager over the default settings location.
    pub fn new() -> Self {
        Self::with_path(Settings::settings_path())
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = Settings::load_from(&path);
        Self {
            path,
            settings: RwLock::new(settings),
            watchers: RwLock::new(Vec::new()),
        }
    }

    /// Process-wide instance, loaded on first use.
    pub fn global() -> &'static ConfigManager {
        GLOBAL.get_or_init(ConfigManager::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the current settings.
    pub fn get(&self) -> Settings {
        self.settings.read().clone()
    }

    pub fn watch<F>(&self, callback: F)
    where
        F: Fn(&Settings) + Send + Sync + 'static,
    {
        self.watchers.write().push(Box::new(callback));
    }

    /// Re-read the settings file and notify watchers.
    pub fn reload(&self) {
        let new_settings = Settings::load_from(&self.path);
        *self.settings.write() = new_settings.clone();
        self.notify(&new_settings);
    }

    /// Apply `updater`, persist the result, then notify watchers.
    ///
    /// The in-memory copy is only replaced when saving succeeds.
    pub fn update(&self, updater: impl FnOnce(&mut Settings)) -> AppResult<()> {
        let new_settings = {
            let mut guard = self.settings.write();
            let mut candidate = guard.clone();
            updater(&mut candidate);
            candidate.save_to(&self.path)?;
            *guard = candidate.clone();
            candidate
        };
        self.notify(&new_settings);
        Ok(())
    }

    fn notify(&self, settings: &Settings) {
        for watcher in self.watchers.read().iter() {
            watcher(settings);
        }
    }

    #[inline]
    pub fn log_filter(&self) -> String {
        self.settings.read().log_filter.clone()
    }

    /// Bitmap window logical client size.
    #[inline]
    pub fn logical_size(&self) -> (i32, i32) {
        let s = self.settings.read();
        (s.window.logical_width, s.window.logical_height)
    }

    /// Requested capture width, height and fps.
    #[inline]
    pub fn capture_defaults(&self) -> (u32, u32, u32) {
        let s = self.settings.read();
        (
            s.capture.default_width,
            s.capture.default_height,
            s.capture.default_fps,
        )
    }

    #[inline]
    pub fn synthetic_source(&self) -> bool {
        self.settings.read().capture.synthetic_source
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
