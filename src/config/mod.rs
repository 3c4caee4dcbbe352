//! Configuration management
//!
//! - Settings loading and caching
//! - Change notification
//! - Thread-safe access

mod manager;

pub use manager::{ConfigManager, ConfigWatcher};
