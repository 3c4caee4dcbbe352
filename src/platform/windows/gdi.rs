// GDI blit of borrowed DIB bytes
//
// The bitmap is painted straight from the caller's BMP buffer; nothing is converted or copied
// apart from the 40-byte info header.

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{BITMAPINFO, BITMAPINFOHEADER, DIB_RGB_COLORS, SetDIBitsToDevice};

use crate::image::BitmapView;
use crate::platform::{Point, Size};

use super::resources::PaintSession;

/// Paint the part of `bitmap` starting at `origin` into the client area of `hwnd`.
///
/// `origin.y` follows `SetDIBitsToDevice` semantics: rows counted from the bottom for bottom-up
/// bitmaps and from the top for top-down ones.
pub fn paint_dib(hwnd: HWND, bitmap: &BitmapView<'_>, origin: Point, size: Size) {
    let paint = PaintSession::begin(hwnd);
    if !paint.is_valid() {
        tracing::warn!("BeginPaint returned no device context");
        return;
    }

    // The header sits at byte 14 of the file, so it is not aligned for a direct reference.
    let header = bitmap.info_header();
    if header.len() < std::mem::size_of::<BITMAPINFOHEADER>() {
        return;
    }
    // SAFETY: length checked above; read_unaligned copes with the odd offset.
    let header =
        unsafe { std::ptr::read_unaligned(header.as_ptr() as *const BITMAPINFOHEADER) };
    let info = BITMAPINFO {
        bmiHeader: header,
        ..Default::default()
    };

    let lines = bitmap.height().unsigned_abs();
    let pixels = bitmap.pixels();
    // SAFETY: `pixels` covers the scan lines described by the header, validated at parse time.
    let copied = unsafe {
        SetDIBitsToDevice(
            paint.hdc(),
            0,
            0,
            size.width.max(0) as u32,
            size.height.max(0) as u32,
            origin.x,
            origin.y,
            0,
            lines,
            pixels.as_ptr() as *const _,
            &info,
            DIB_RGB_COLORS,
        )
    };
    if copied == 0 {
        tracing::debug!(?origin, ?size, "SetDIBitsToDevice copied no scan lines");
    }
}
