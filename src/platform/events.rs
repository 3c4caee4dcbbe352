//! Platform-agnostic window events
//!
//! Native messages (e.g. `WM_HSCROLL`) are converted into these types at the platform boundary,
//! so the bitmap viewport logic never touches the Win32 API.

use super::traits::Size;

/// Scrollbar axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];
}

/// Scrollbar request carried by a scroll message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    /// Thumb is being dragged to `pos`.
    ThumbTrack(i32),
    /// Thumb was released at `pos`.
    ThumbPosition(i32),
    /// Line left / line up.
    LineBackward,
    /// Line right / line down.
    LineForward,
    /// Page steps, end-scroll and friends.
    Other,
}

/// Kind of resize reported by the window system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeKind {
    Restored,
    Minimized,
    Maximized,
    Other,
}

/// Window event the bitmap viewport reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    /// Client area needs painting.
    Repaint,
    ScrollH(ScrollAction),
    ScrollV(ScrollAction),
    /// Size-constraint query. `frame` is the non-client chrome and `scrollbars` the space both
    /// scrollbars consume.
    SizeQuery { frame: Size, scrollbars: Size },
    /// New client extent.
    Resize {
        kind: ResizeKind,
        width: i32,
        height: i32,
    },
    /// Native window is going away.
    Destroyed,
    Other,
}

/// Raw platform message, kept so default processing can see the original parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawMessage {
    pub msg: u32,
    pub wparam: usize,
    pub lparam: isize,
}

/// Converted event plus the raw message it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMessage {
    pub event: WindowEvent,
    pub raw: RawMessage,
}

impl WindowMessage {
    pub fn new(event: WindowEvent, raw: RawMessage) -> Self {
        Self { event, raw }
    }

    /// Message without native parameters (scripted systems, tests).
    pub fn synthetic(event: WindowEvent) -> Self {
        Self {
            event,
            raw: RawMessage::default(),
        }
    }
}
