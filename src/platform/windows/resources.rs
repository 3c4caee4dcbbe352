//! RAII wrappers for Win32 GDI resources
//!
//! ## Example
//! ```ignore
//! let paint = PaintSession::begin(hwnd);
//! // draw into paint.hdc()...
//! // EndPaint runs when `paint` leaves scope
//! ```

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{BeginPaint, EndPaint, HDC, PAINTSTRUCT};

/// One `BeginPaint`/`EndPaint` cycle.
///
/// Must only be created while handling `WM_PAINT`; dropping it validates the update region.
#[derive(Debug)]
pub struct PaintSession {
    hwnd: HWND,
    ps: PAINTSTRUCT,
    hdc: HDC,
}

impl PaintSession {
    pub fn begin(hwnd: HWND) -> Self {
        let mut ps = PAINTSTRUCT::default();
        // SAFETY: hwnd is the window whose WM_PAINT is being handled.
        let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
        Self { hwnd, ps, hdc }
    }

    #[inline]
    pub fn hdc(&self) -> HDC {
        self.hdc
    }

    /// Whether a device context was obtained.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.hdc.is_invalid()
    }
}

impl Drop for PaintSession {
    fn drop(&mut self) {
        // SAFETY: pairs the BeginPaint in `begin`.
        unsafe {
            let _ = EndPaint(self.hwnd, &self.ps);
        }
    }
}
