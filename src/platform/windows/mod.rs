//! Win32 implementation of the window system
//!
//! - `gdi`: DIB blit inside the paint cycle
//! - `messages`: native message conversion and the shared window procedure
//! - `resources`: RAII wrappers
//! - `system`: metric and DPI queries

mod gdi;
mod messages;
pub mod resources;
pub mod system;

pub use messages::{convert_message, convert_scroll};

use std::sync::OnceLock;

use windows::Win32::Foundation::{
    ERROR_CLASS_ALREADY_EXISTS, GetLastError, HWND, LPARAM, RECT, WPARAM,
};
use windows::Win32::Graphics::Gdi::{GetStockObject, HBRUSH, InvalidateRect, WHITE_BRUSH};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Controls::{ESB_DISABLE_BOTH, ESB_ENABLE_BOTH, EnableScrollBar};
use windows::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW, DispatchMessageW,
    GetClientRect, GetMessageW, GetWindowRect, HMENU, IDC_ARROW, LoadCursorW, MB_ICONERROR, MB_OK,
    MINMAXINFO, MSG, MessageBoxW, PostQuitMessage, RegisterClassW, SB_HORZ, SB_VERT,
    SCROLLBAR_CONSTANTS, SWP_NOSIZE, SWP_NOZORDER, SetScrollPos, SetScrollRange, SetWindowPos,
    TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_GETMINMAXINFO, WNDCLASSW, WS_CAPTION,
    WS_HSCROLL, WS_MAXIMIZEBOX, WS_MINIMIZEBOX, WS_OVERLAPPED, WS_SYSMENU, WS_THICKFRAME,
    WS_VISIBLE, WS_VSCROLL,
};
use windows::core::PCWSTR;

use crate::constants::WINDOW_CLASS_NAME;
use crate::error::PlatformError;
use crate::image::BitmapView;
use crate::platform::{
    Axis, Point, RawMessage, Rect, Size, WindowId, WindowSpec, WindowStyle, WindowSystem,
};

use system::rect_from_win32;

#[inline]
pub(crate) fn hwnd(window: WindowId) -> HWND {
    HWND(window.raw() as *mut std::ffi::c_void)
}

#[inline]
pub(crate) fn window_id(hwnd: HWND) -> WindowId {
    WindowId::from_raw(hwnd.0 as usize)
}

fn to_wide(text: &str) -> Vec<u16> {
    text.encode_utf16().chain(std::iter::once(0)).collect()
}

fn scroll_bar(axis: Axis) -> SCROLLBAR_CONSTANTS {
    match axis {
        Axis::Horizontal => SB_HORZ,
        Axis::Vertical => SB_VERT,
    }
}

fn native_style(style: &WindowStyle) -> WINDOW_STYLE {
    let mut bits = WS_OVERLAPPED;
    for (on, flag) in [
        (style.caption, WS_CAPTION),
        (style.system_menu, WS_SYSMENU),
        (style.resizable, WS_THICKFRAME),
        (style.minimize_box, WS_MINIMIZEBOX),
        (style.maximize_box, WS_MAXIMIZEBOX),
        (style.horizontal_scroll, WS_HSCROLL),
        (style.vertical_scroll, WS_VSCROLL),
        (style.visible, WS_VISIBLE),
    ] {
        if on {
            bits |= flag;
        }
    }
    bits
}

static CLASS_REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();

fn register_class() -> Result<(), PlatformError> {
    CLASS_REGISTERED
        .get_or_init(|| unsafe {
            let instance = GetModuleHandleW(None).map_err(|e| e.to_string())?;
            let cursor = LoadCursorW(None, IDC_ARROW).map_err(|e| e.to_string())?;
            let class_name = to_wide(WINDOW_CLASS_NAME);
            let window_class = WNDCLASSW {
                lpfnWndProc: Some(messages::window_proc),
                hInstance: instance.into(),
                lpszClassName: PCWSTR(class_name.as_ptr()),
                hCursor: cursor,
                hbrBackground: HBRUSH(GetStockObject(WHITE_BRUSH).0),
                style: CS_HREDRAW | CS_VREDRAW,
                ..Default::default()
            };
            if RegisterClassW(&window_class) == 0 {
                let err = GetLastError();
                if err != ERROR_CLASS_ALREADY_EXISTS {
                    return Err(format!("RegisterClassW failed: {err:?}"));
                }
            }
            tracing::debug!(class = WINDOW_CLASS_NAME, "window class registered");
            Ok(())
        })
        .clone()
        .map_err(PlatformError::InitializationError)
}

/// [`WindowSystem`] backed by user32/gdi32.
///
/// Stateless apart from the process-wide window class, so instances are free to create.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }
}

impl WindowSystem for Win32WindowSystem {
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowId, PlatformError> {
        register_class()?;

        let class_name = to_wide(WINDOW_CLASS_NAME);
        let title = to_wide(&spec.title);
        let (x, y) = spec
            .position
            .map_or((CW_USEDEFAULT, CW_USEDEFAULT), |p| (p.x, p.y));

        let handle = unsafe {
            let instance = GetModuleHandleW(None)?;
            CreateWindowExW(
                WINDOW_EX_STYLE(spec.ex_style),
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                native_style(&spec.style),
                x,
                y,
                spec.size.width,
                spec.size.height,
                spec.parent.map(hwnd),
                spec.menu.map(|m| HMENU(m as *mut std::ffi::c_void)),
                Some(instance.into()),
                None,
            )?
        };
        Ok(window_id(handle))
    }

    fn run_modal_loop(&self, _window: WindowId) -> i32 {
        let mut msg = MSG::default();
        unsafe {
            while GetMessageW(&mut msg, None, 0, 0).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
        msg.wParam.0 as i32
    }

    fn post_quit(&self, code: i32) {
        unsafe { PostQuitMessage(code) };
    }

    fn default_proc(&self, window: WindowId, raw: RawMessage) -> isize {
        unsafe { DefWindowProcW(hwnd(window), raw.msg, WPARAM(raw.wparam), LPARAM(raw.lparam)).0 }
    }

    fn window_rect(&self, window: WindowId) -> Rect {
        let mut rect = RECT::default();
        if let Err(e) = unsafe { GetWindowRect(hwnd(window), &mut rect) } {
            tracing::warn!(window = window.raw(), "GetWindowRect failed: {e}");
        }
        rect_from_win32(rect)
    }

    fn client_rect(&self, window: WindowId) -> Rect {
        let mut rect = RECT::default();
        if let Err(e) = unsafe { GetClientRect(hwnd(window), &mut rect) } {
            tracing::warn!(window = window.raw(), "GetClientRect failed: {e}");
        }
        rect_from_win32(rect)
    }

    fn work_area(&self) -> Rect {
        system::get_work_area()
    }

    fn move_window(&self, window: WindowId, origin: Point) {
        let result = unsafe {
            SetWindowPos(
                hwnd(window),
                None,
                origin.x,
                origin.y,
                0,
                0,
                SWP_NOSIZE | SWP_NOZORDER,
            )
        };
        if let Err(e) = result {
            tracing::warn!(window = window.raw(), "SetWindowPos failed: {e}");
        }
    }

    fn dpi_scale(&self) -> f32 {
        system::get_dpi_scale()
    }

    fn enable_scroll_bar(&self, window: WindowId, axis: Axis, enabled: bool) {
        let arrows = if enabled {
            ESB_ENABLE_BOTH
        } else {
            ESB_DISABLE_BOTH
        };
        // Fails harmlessly when the bar is already in the requested state.
        let _ = unsafe { EnableScrollBar(hwnd(window), scroll_bar(axis), arrows) };
    }

    fn set_scroll_range(&self, window: WindowId, axis: Axis, min: i32, max: i32) {
        if let Err(e) = unsafe { SetScrollRange(hwnd(window), scroll_bar(axis), min, max, true) } {
            tracing::warn!(window = window.raw(), ?axis, "SetScrollRange failed: {e}");
        }
    }

    fn set_scroll_pos(&self, window: WindowId, axis: Axis, pos: i32) {
        let _ = unsafe { SetScrollPos(hwnd(window), scroll_bar(axis), pos, true) };
    }

    fn invalidate(&self, window: WindowId) {
        let _ = unsafe { InvalidateRect(Some(hwnd(window)), None, false) };
    }

    fn paint_bitmap(&self, window: WindowId, bitmap: &BitmapView<'_>, origin: Point, size: Size) {
        gdi::paint_dib(hwnd(window), bitmap, origin, size);
    }

    fn set_max_track_size(&self, raw: RawMessage, size: Size) {
        if raw.msg != WM_GETMINMAXINFO {
            return;
        }
        let info = raw.lparam as *mut MINMAXINFO;
        if info.is_null() {
            return;
        }
        // SAFETY: lParam of WM_GETMINMAXINFO points at a MINMAXINFO owned by the system.
        unsafe {
            (*info).ptMaxTrackSize.x = size.width;
            (*info).ptMaxTrackSize.y = size.height;
        }
    }

    fn show_error(&self, title: &str, message: &str) {
        let title = to_wide(title);
        let message = to_wide(message);
        unsafe {
            MessageBoxW(
                None,
                PCWSTR(message.as_ptr()),
                PCWSTR(title.as_ptr()),
                MB_OK | MB_ICONERROR,
            );
        }
    }
}
