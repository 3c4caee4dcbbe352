//! Bitmap viewport window and pluggable video capture.
//!
//! - [`platform`]: window-system seam, window registry, Win32 adapter
//! - [`ui`]: base window and the scrollable bitmap window
//! - [`image`]: BMP views and capture frames
//! - [`videoio`]: capture backends and the [`VideoCapture`] facade

pub mod config;
pub mod constants;
pub mod error;
pub mod image;
pub mod logging;
pub mod platform;
pub mod settings;
pub mod ui;
pub mod videoio;

pub use error::{AppError, AppResult};
pub use image::{BitmapView, Mat, MatType};
pub use platform::{WindowRegistry, WindowSystem};
pub use ui::{BitmapWindow, Window};
pub use videoio::{CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH, VideoCapture};
