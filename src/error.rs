// Unified Error Handling Module
//
// Centralized error types for consistent error management across the crate

use std::io;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("UI error: {0}")]
    UI(#[from] UiError),

    #[error("Bitmap error: {0}")]
    Bitmap(#[from] BitmapError),

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Platform-specific errors
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Initialization failed: {0}")]
    InitializationError(String),

    #[error("Windows API error: {0}")]
    Windows(String),
}

/// Window-related errors
#[derive(Debug, Error)]
pub enum UiError {
    #[error("Window creation failed: {0}")]
    WindowCreationError(String),
}

/// Errors raised while locating the headers of raw BMP bytes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BitmapError {
    #[error("BMP data too small: {len} bytes")]
    Truncated { len: usize },

    #[error("Missing BM signature")]
    BadSignature,

    #[error("Unsupported bit count: {0}")]
    UnsupportedBitCount(u16),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Capture backend errors
///
/// The facade only distinguishes success from failure; the message is logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Capture is not supported on this platform")]
    Unsupported,

    #[error("Capture device {0} is busy or missing")]
    DeviceUnavailable(i32),

    #[error("Backend is not open")]
    NotOpen,

    #[error("Streaming failed: {0}")]
    Stream(String),

    #[error("Frame buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(windows)]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::Windows(format!("{err:?}"))
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for AppError {
    fn from(err: windows::core::Error) -> Self {
        AppError::Platform(err.into())
    }
}
