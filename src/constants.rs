pub const WINDOW_CLASS_NAME: &str = "SC_HIGHGUI_BITMAP_WINDOW";

// Bitmap window logical size, scaled by DPI at creation.
pub const BITMAP_WINDOW_LOGICAL_WIDTH: i32 = 800;
pub const BITMAP_WINDOW_LOGICAL_HEIGHT: i32 = 640;

// Capture baseline while no session is open.
pub const DEFAULT_FRAME_WIDTH: u32 = 640;
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;
pub const DEFAULT_FPS: u32 = 30;

/// Highest rate the synthetic source negotiates.
pub const SYNTHETIC_MAX_FPS: u32 = 60;

/// Win32 baseline DPI.
pub const BASE_DPI: u32 = 96;
