use crate::error::PlatformError;
use crate::image::BitmapView;

use super::events::{Axis, RawMessage};

/// Opaque window identifier.
///
/// This is used to avoid leaking platform window handles (e.g. Win32 `HWND`) across module
/// boundaries. Platform backends convert to/from raw handles as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(usize);

impl WindowId {
    pub const INVALID: WindowId = WindowId(0);

    #[inline]
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> usize {
        self.0
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

/// Point in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Extent in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along one axis.
    #[inline]
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Multiply by a DPI scale factor, rounding to the nearest pixel.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            width: (self.width as f32 * factor).round() as i32,
            height: (self.height as f32 * factor).round() as i32,
        }
    }
}

/// Rectangle in screen or client coordinates (right/bottom exclusive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

/// Window style, decoupled from platform style bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStyle {
    pub caption: bool,
    pub system_menu: bool,
    pub resizable: bool,
    pub minimize_box: bool,
    pub maximize_box: bool,
    pub horizontal_scroll: bool,
    pub vertical_scroll: bool,
    pub visible: bool,
}

impl WindowStyle {
    /// Overlapped, resizable, both scrollbars, no maximize box.
    pub const BITMAP_VIEWER: WindowStyle = WindowStyle {
        caption: true,
        system_menu: true,
        resizable: true,
        minimize_box: true,
        maximize_box: false,
        horizontal_scroll: true,
        vertical_scroll: true,
        visible: true,
    };
}

/// Everything a native creation call needs.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub title: String,
    pub style: WindowStyle,
    /// Extended style bits passed through untouched.
    pub ex_style: u32,
    /// `None` lets the window system pick a position.
    pub position: Option<Point>,
    pub size: Size,
    pub parent: Option<WindowId>,
    pub menu: Option<usize>,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, style: WindowStyle, size: Size) -> Self {
        Self {
            title: title.into(),
            style,
            ex_style: 0,
            position: None,
            size,
            parent: None,
            menu: None,
        }
    }
}

/// Native window-system boundary.
///
/// Windows and bitmap windows only talk to the platform through this trait, so the message
/// handling logic stays testable with a scripted implementation.
pub trait WindowSystem: Send + Sync {
    /// Create a native window. Messages emitted during creation are routed through the
    /// process-wide registry before this call returns.
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowId, PlatformError>;

    /// Pump messages until the loop is told to quit; returns the quit code.
    fn run_modal_loop(&self, window: WindowId) -> i32;

    /// Ask the running loop to exit with `code`.
    fn post_quit(&self, code: i32);

    /// Native default processing for a message nobody handled.
    fn default_proc(&self, window: WindowId, raw: RawMessage) -> isize;

    fn window_rect(&self, window: WindowId) -> Rect;

    fn client_rect(&self, window: WindowId) -> Rect;

    /// Primary screen work area.
    fn work_area(&self) -> Rect;

    /// Move without resizing.
    fn move_window(&self, window: WindowId, origin: Point);

    /// Logical-to-physical pixel ratio.
    fn dpi_scale(&self) -> f32;

    fn enable_scroll_bar(&self, window: WindowId, axis: Axis, enabled: bool);

    fn set_scroll_range(&self, window: WindowId, axis: Axis, min: i32, max: i32);

    fn set_scroll_pos(&self, window: WindowId, axis: Axis, pos: i32);

    /// Mark the whole client area dirty without painting synchronously.
    fn invalidate(&self, window: WindowId);

    /// Blit `bitmap` starting at `origin` into the client area, inside the paint cycle.
    fn paint_bitmap(&self, window: WindowId, bitmap: &BitmapView<'_>, origin: Point, size: Size);

    /// Write the maximum track size into the size-constraint query carried by `raw`.
    fn set_max_track_size(&self, raw: RawMessage, size: Size);

    fn show_error(&self, title: &str, message: &str);
}
