//! Global `tracing` subscriber setup.

use std::path::Path;

use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

/// Install the fmt subscriber. `RUST_LOG` wins over `fallback_filter`.
///
/// Returns `false` when a subscriber was already installed; the existing one stays active.
pub fn init(fallback_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(fallback_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

/// Filter configured in the settings file at `path`, for use before [`init`].
///
/// Reads strictly and silently: nothing is logged (no subscriber exists yet) and a missing file
/// is not created. Anything unreadable yields the default filter.
pub fn startup_filter(path: &Path) -> String {
    Settings::read_from(path)
        .map(|settings| settings.log_filter)
        .unwrap_or_else(|_| Settings::default().log_filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("sc_highgui_logging_{}_{name}", std::process::id()));
        dir
    }

    #[test]
    fn startup_filter_does_not_create_missing_file() {
        let path = temp_dir("missing").join("settings.json");
        assert_eq!(startup_filter(&path), "info");
        assert!(!path.exists());
    }

    #[test]
    fn startup_filter_reads_configured_value() {
        let dir = temp_dir("configured");
        let path = dir.join("settings.json");
        let settings = Settings {
            log_filter: "sc_highgui=debug".into(),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        assert_eq!(startup_filter(&path), "sc_highgui=debug");
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn second_init_is_harmless() {
        init("debug");
        assert!(!init("not a [valid filter"));
    }
}
