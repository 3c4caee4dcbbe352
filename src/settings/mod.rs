//! Settings module
//!
//! - Core settings data structure and JSON persistence
//! - Default value functions for serde

mod core;
mod defaults;

pub use core::{CaptureSettings, Settings, WindowSettings};
