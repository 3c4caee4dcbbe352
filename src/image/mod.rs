//! Image buffers: non-owning BMP views for display, owned frames for capture.

pub mod bmp;
mod mat;

pub use bmp::BitmapView;
pub use mat::{Mat, MatType};
