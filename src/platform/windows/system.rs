// Windows system helpers
//
// Centralize the metric queries used by the window system and the message converter.

use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::UI::HiDpi::GetDpiForSystem;
use windows::Win32::UI::WindowsAndMessaging::{
    AdjustWindowRectEx, GWL_EXSTYLE, GWL_STYLE, GetSystemMetrics, GetWindowLongW, SM_CXSCREEN,
    SM_CXVSCROLL, SM_CYHSCROLL, SM_CYSCREEN, SPI_GETWORKAREA, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
    SystemParametersInfoW, WINDOW_EX_STYLE, WINDOW_STYLE,
};

use crate::constants::BASE_DPI;
use crate::platform::{Rect, Size};

pub fn get_screen_size() -> (i32, i32) {
    let w = unsafe { GetSystemMetrics(SM_CXSCREEN) };
    let h = unsafe { GetSystemMetrics(SM_CYSCREEN) };
    (w, h)
}

/// Primary monitor work area, falling back to the full screen.
pub fn get_work_area() -> Rect {
    let mut rect = RECT::default();
    let ok = unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut rect as *mut RECT as *mut _),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };
    match ok {
        Ok(()) => rect_from_win32(rect),
        Err(e) => {
            tracing::warn!("SPI_GETWORKAREA failed: {e}");
            let (w, h) = get_screen_size();
            Rect::new(0, 0, w, h)
        }
    }
}

/// System DPI relative to 96.
pub fn get_dpi_scale() -> f32 {
    let dpi = unsafe { GetDpiForSystem() };
    if dpi == 0 {
        1.0
    } else {
        dpi as f32 / BASE_DPI as f32
    }
}

/// Space taken by a vertical scrollbar (width) and a horizontal one (height).
pub fn get_scrollbar_size() -> Size {
    let w = unsafe { GetSystemMetrics(SM_CXVSCROLL) };
    let h = unsafe { GetSystemMetrics(SM_CYHSCROLL) };
    Size::new(w, h)
}

/// Non-client chrome of `hwnd` given its current styles.
pub fn get_frame_size(hwnd: HWND) -> Size {
    let style = WINDOW_STYLE(unsafe { GetWindowLongW(hwnd, GWL_STYLE) } as u32);
    let ex_style = WINDOW_EX_STYLE(unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) } as u32);
    let mut rect = RECT::default();
    if let Err(e) = unsafe { AdjustWindowRectEx(&mut rect, style, false, ex_style) } {
        tracing::debug!("AdjustWindowRectEx failed: {e}");
        return Size::default();
    }
    Size::new(rect.right - rect.left, rect.bottom - rect.top)
}

#[inline]
pub fn rect_from_win32(rect: RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}
