//! Windows built on the platform seam.
//!
//! - [`window`]: base window lifecycle and message dispatch
//! - [`viewport`]: pure scroll/resize/paint state machine
//! - [`bitmap_window`]: scrollable bitmap viewer

pub mod bitmap_window;
pub mod viewport;
pub mod window;

pub use bitmap_window::BitmapWindow;
pub use viewport::{Effect, ScrollBarState, ViewportState, transition};
pub use window::{Window, centered_origin, default_window_proc, dispatch_message};
