use std::cell::Cell;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::UiError;
use crate::platform::{
    HandlerRef, Point, Rect, Size, WindowEvent, WindowId, WindowMessage, WindowRegistry,
    WindowSpec, WindowSystem,
};

/// Base native window: creation, modal loop, centering, default message handling.
///
/// The window owns its identity's registry entry and removes it exactly once, either when the
/// modal loop exits or when the window is dropped. Lifecycle calls take `&self`: messages
/// re-enter the owner while they run.
pub struct Window {
    identity: Cell<Option<WindowId>>,
    system: Arc<dyn WindowSystem>,
    registry: &'static WindowRegistry<HandlerRef>,
}

impl Window {
    pub fn new(system: Arc<dyn WindowSystem>, registry: &'static WindowRegistry<HandlerRef>) -> Self {
        Self {
            identity: Cell::new(None),
            system,
            registry,
        }
    }

    #[inline]
    pub fn identity(&self) -> Option<WindowId> {
        self.identity.get()
    }

    #[inline]
    pub fn system(&self) -> &Arc<dyn WindowSystem> {
        &self.system
    }

    #[inline]
    pub fn registry(&self) -> &'static WindowRegistry<HandlerRef> {
        self.registry
    }

    /// Create the native window and register `owner` as the receiver of its messages.
    ///
    /// # Panics
    /// If this window already owns an identity.
    pub fn create(&self, spec: &WindowSpec, owner: HandlerRef) -> Result<WindowId, UiError> {
        assert!(
            self.identity.get().is_none(),
            "Window::create called twice on the same window"
        );

        let pending = self.registry.reserve(owner);
        match self.system.create_window(spec) {
            Ok(window) => {
                pending.commit(window);
                self.identity.set(Some(window));
                info!(window = window.raw(), title = %spec.title, "window created");
                Ok(window)
            }
            Err(e) => {
                drop(pending);
                error!(title = %spec.title, "window creation failed: {e}");
                Err(UiError::WindowCreationError(e.to_string()))
            }
        }
    }

    /// Run the message loop until the window quits, then release the identity.
    ///
    /// # Panics
    /// If the window was never created.
    pub fn do_modal(&self) -> i32 {
        let Some(window) = self.identity.get() else {
            panic!("Window::do_modal called before create");
        };

        let system = Arc::clone(&self.system);
        let code = system.run_modal_loop(window);
        self.registry.unregister(window);
        self.identity.set(None);
        debug!(window = window.raw(), code, "modal loop finished");
        code
    }

    /// Move the window to the middle of the primary work area, keeping its size.
    pub fn center_window(&self) {
        let Some(window) = self.identity.get() else {
            return;
        };
        let rect = self.system.window_rect(window);
        let origin = centered_origin(rect.size(), self.system.work_area());
        self.system.move_window(window, origin);
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        if let Some(window) = self.identity.take() {
            self.registry.unregister(window);
        }
    }
}

/// Top-left corner that centers `size` inside `work`.
pub fn centered_origin(size: Size, work: Rect) -> Point {
    Point::new(
        work.left + (work.width() - size.width) / 2,
        work.top + (work.height() - size.height) / 2,
    )
}

/// Base behaviour: a destroyed window ends its loop, everything else goes to the platform.
pub fn default_window_proc(
    system: &dyn WindowSystem,
    window: WindowId,
    message: &WindowMessage,
) -> isize {
    match message.event {
        WindowEvent::Destroyed => {
            system.post_quit(0);
            0
        }
        _ => system.default_proc(window, message.raw),
    }
}

/// Route one native message to its owner, falling back to default processing.
///
/// An identity that resolves to nobody outside a creation is a routing bug; it is reported and
/// handled by the platform default so the native callback never unwinds.
pub fn dispatch_message(
    registry: &WindowRegistry<HandlerRef>,
    system: &dyn WindowSystem,
    window: WindowId,
    message: &WindowMessage,
) -> isize {
    match registry.resolve(window) {
        Some(owner) => {
            // SAFETY: owners unregister before they are dropped or moved.
            let handled = unsafe { owner.call(window, message) };
            handled.unwrap_or_else(|| default_window_proc(system, window, message))
        }
        None => {
            warn!(
                window = window.raw(),
                event = ?message.event,
                "message for an unregistered window"
            );
            default_window_proc(system, window, message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_origin_keeps_window_inside_work_area() {
        let work = Rect::new(0, 0, 1920, 1040);
        assert_eq!(
            centered_origin(Size::new(800, 640), work),
            Point::new(560, 200)
        );
    }

    #[test]
    fn centered_origin_respects_work_area_offset() {
        let work = Rect::new(100, 50, 1100, 850);
        assert_eq!(
            centered_origin(Size::new(200, 100), work),
            Point::new(500, 400)
        );
    }
}
