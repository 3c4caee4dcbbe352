use std::cell::RefCell;
use std::sync::Arc;

use tracing::{debug, error};

use crate::constants::{BITMAP_WINDOW_LOGICAL_HEIGHT, BITMAP_WINDOW_LOGICAL_WIDTH};
use crate::error::{AppResult, BitmapError};
use crate::image::BitmapView;
use crate::platform::{
    HandlerRef, MessageTarget, RawMessage, Size, TargetBox, WindowId, WindowMessage,
    WindowRegistry, WindowSpec, WindowStyle, WindowSystem,
};

use super::viewport::{Effect, ViewportState};
use super::window::Window;

/// Window that pans a fixed bitmap larger than its client area.
///
/// The bitmap bytes are borrowed for the window's lifetime and never copied.
pub struct BitmapWindow<'a> {
    window: Window,
    // Dropped after `window`, which unregisters the identity first.
    canvas: TargetBox<BitmapCanvas<'a>>,
    logical_size: Size,
}

/// Message-handling half of a [`BitmapWindow`], registered for its identity.
struct BitmapCanvas<'a> {
    system: Arc<dyn WindowSystem>,
    bitmap: BitmapView<'a>,
    viewport: RefCell<ViewportState>,
}

impl<'a> BitmapWindow<'a> {
    /// Wrap raw BMP file bytes (file header, info header, pixels).
    pub fn new(
        data: &'a [u8],
        system: Arc<dyn WindowSystem>,
        registry: &'static WindowRegistry<HandlerRef>,
    ) -> Result<Self, BitmapError> {
        let bitmap = BitmapView::parse(data)?;
        debug!(
            width = bitmap.width(),
            height = bitmap.height(),
            bit_count = bitmap.bit_count(),
            "bitmap window over {} bytes",
            data.len()
        );

        Ok(Self {
            window: Window::new(Arc::clone(&system), registry),
            canvas: TargetBox::new(BitmapCanvas {
                system,
                viewport: RefCell::new(ViewportState::new(bitmap.width(), bitmap.height())),
                bitmap,
            }),
            logical_size: Size::new(BITMAP_WINDOW_LOGICAL_WIDTH, BITMAP_WINDOW_LOGICAL_HEIGHT),
        })
    }

    /// Override the logical (unscaled) initial window size.
    pub fn with_logical_size(mut self, size: Size) -> Self {
        self.logical_size = size;
        self
    }

    #[inline]
    pub fn bitmap(&self) -> &BitmapView<'a> {
        &self.canvas.get().bitmap
    }

    /// Snapshot of the scroll and origin state.
    #[inline]
    pub fn viewport(&self) -> ViewportState {
        *self.canvas.get().viewport.borrow()
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Create the window, center it and run its modal loop.
    ///
    /// Returns the loop's exit code, or the creation error without entering the loop.
    pub fn show(&self, title: &str) -> AppResult<i32> {
        let system = Arc::clone(self.window.system());
        let size = self.logical_size.scaled(system.dpi_scale());
        let spec = WindowSpec::new(title, WindowStyle::BITMAP_VIEWER, size);

        if let Err(e) = self.window.create(&spec, self.canvas.handler()) {
            error!("bitmap window not shown: {e}");
            system.show_error("Error", &format!("Failed to create window: {e}"));
            return Err(e.into());
        }

        self.window.center_window();
        Ok(self.window.do_modal())
    }

    /// Recompute the origin from the given (or current) scroll positions and schedule a repaint.
    pub fn draw_bitmap(&self, horz: Option<i32>, vert: Option<i32>) {
        let canvas = self.canvas.get();
        let effect = canvas.viewport.borrow_mut().draw_bitmap(horz, vert);
        if let Some(window) = self.window.identity() {
            canvas.execute(window, effect, RawMessage::default());
        }
    }
}

impl BitmapCanvas<'_> {
    /// Run one effect; returns `false` when the message should go to default processing.
    fn execute(&self, window: WindowId, effect: Effect, raw: RawMessage) -> bool {
        let system = self.system.as_ref();
        match effect {
            Effect::Paint { origin, size } => {
                system.paint_bitmap(window, &self.bitmap, origin, size)
            }
            Effect::Invalidate => system.invalidate(window),
            Effect::EnableScrollBar { axis, enabled } => {
                system.enable_scroll_bar(window, axis, enabled)
            }
            Effect::SetScrollRange { axis, min, max } => {
                system.set_scroll_range(window, axis, min, max)
            }
            Effect::SetScrollPos { axis, pos } => system.set_scroll_pos(window, axis, pos),
            Effect::SetMaxTrackSize(size) => system.set_max_track_size(raw, size),
            Effect::Default => return false,
        }
        true
    }
}

impl MessageTarget for BitmapCanvas<'_> {
    fn handle_message(&self, window: WindowId, message: &WindowMessage) -> Option<isize> {
        // The borrow ends before any effect runs; effects may send messages back.
        let effects = self.viewport.borrow_mut().apply(&message.event);
        let mut handled = true;
        for effect in effects {
            handled &= self.execute(window, effect, message.raw);
        }
        handled.then_some(0)
    }
}
