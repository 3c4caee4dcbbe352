/// Property id for the frame width.
pub const CAP_PROP_FRAME_WIDTH: i32 = 3;
/// Property id for the frame height.
pub const CAP_PROP_FRAME_HEIGHT: i32 = 4;
/// Property id for the frame rate.
pub const CAP_PROP_FPS: i32 = 5;

/// Capture properties the facade understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureProperty {
    FrameWidth,
    FrameHeight,
    Fps,
}

impl CaptureProperty {
    /// `None` for ids the facade does not recognize.
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            CAP_PROP_FRAME_WIDTH => Some(CaptureProperty::FrameWidth),
            CAP_PROP_FRAME_HEIGHT => Some(CaptureProperty::FrameHeight),
            CAP_PROP_FPS => Some(CaptureProperty::Fps),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            CaptureProperty::FrameWidth => CAP_PROP_FRAME_WIDTH,
            CaptureProperty::FrameHeight => CAP_PROP_FRAME_HEIGHT,
            CaptureProperty::Fps => CAP_PROP_FPS,
        }
    }
}
