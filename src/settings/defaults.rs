//! Settings default value functions for serde
//!
//! Every field missing from an older settings file falls back to one of these.

use crate::constants::{
    BITMAP_WINDOW_LOGICAL_HEIGHT, BITMAP_WINDOW_LOGICAL_WIDTH, DEFAULT_FPS, DEFAULT_FRAME_HEIGHT,
    DEFAULT_FRAME_WIDTH,
};

pub fn default_log_filter() -> String {
    "info".to_string()
}

// Window defaults
pub fn default_logical_width() -> i32 {
    BITMAP_WINDOW_LOGICAL_WIDTH
}
pub fn default_logical_height() -> i32 {
    BITMAP_WINDOW_LOGICAL_HEIGHT
}

// Capture defaults
pub fn default_frame_width() -> u32 {
    DEFAULT_FRAME_WIDTH
}
pub fn default_frame_height() -> u32 {
    DEFAULT_FRAME_HEIGHT
}
pub fn default_fps() -> u32 {
    DEFAULT_FPS
}
pub fn default_synthetic_source() -> bool {
    false
}
