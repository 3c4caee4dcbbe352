//! Win32 message conversion and the shared window procedure.

use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    DefWindowProcW, SB_LINEDOWN, SB_LINELEFT, SB_LINERIGHT, SB_LINEUP, SB_THUMBPOSITION,
    SB_THUMBTRACK, SCROLLBAR_COMMAND, SIZE_MAXIMIZED, SIZE_MINIMIZED, SIZE_RESTORED, WM_DESTROY,
    WM_GETMINMAXINFO, WM_HSCROLL, WM_PAINT, WM_SIZE, WM_VSCROLL,
};

use crate::platform::{
    Axis, RawMessage, ResizeKind, ScrollAction, WindowEvent, WindowMessage, WindowRegistry,
};
use crate::ui::dispatch_message;

use super::system::{get_frame_size, get_scrollbar_size};
use super::{Win32WindowSystem, window_id};

#[inline]
fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

#[inline]
fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

/// Decode the scroll request carried by a `WM_HSCROLL`/`WM_VSCROLL` `wParam`.
pub fn convert_scroll(axis: Axis, wparam: usize) -> ScrollAction {
    let code = SCROLLBAR_COMMAND(loword(wparam) as i32);
    let pos = hiword(wparam) as i32;
    let (backward, forward) = match axis {
        Axis::Horizontal => (SB_LINELEFT, SB_LINERIGHT),
        Axis::Vertical => (SB_LINEUP, SB_LINEDOWN),
    };

    if code == SB_THUMBTRACK {
        ScrollAction::ThumbTrack(pos)
    } else if code == SB_THUMBPOSITION {
        ScrollAction::ThumbPosition(pos)
    } else if code == backward {
        ScrollAction::LineBackward
    } else if code == forward {
        ScrollAction::LineForward
    } else {
        ScrollAction::Other
    }
}

fn convert_resize(wparam: usize, lparam: isize) -> WindowEvent {
    let kind = match wparam as u32 {
        SIZE_RESTORED => ResizeKind::Restored,
        SIZE_MINIMIZED => ResizeKind::Minimized,
        SIZE_MAXIMIZED => ResizeKind::Maximized,
        _ => ResizeKind::Other,
    };
    WindowEvent::Resize {
        kind,
        width: loword(lparam as usize) as i32,
        height: hiword(lparam as usize) as i32,
    }
}

/// Translate a native message into a [`WindowMessage`], keeping the raw parameters.
pub fn convert_message(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> WindowMessage {
    let raw = RawMessage {
        msg,
        wparam: wparam.0,
        lparam: lparam.0,
    };

    let event = match msg {
        WM_PAINT => WindowEvent::Repaint,
        WM_HSCROLL => WindowEvent::ScrollH(convert_scroll(Axis::Horizontal, wparam.0)),
        WM_VSCROLL => WindowEvent::ScrollV(convert_scroll(Axis::Vertical, wparam.0)),
        WM_GETMINMAXINFO => WindowEvent::SizeQuery {
            frame: get_frame_size(hwnd),
            scrollbars: get_scrollbar_size(),
        },
        WM_SIZE => convert_resize(wparam.0, lparam.0),
        WM_DESTROY => WindowEvent::Destroyed,
        _ => WindowEvent::Other,
    };

    WindowMessage::new(event, raw)
}

/// Window procedure shared by every window of the class.
///
/// Routes through the process-wide registry. A panic is caught here and the message handed to
/// `DefWindowProcW`, since unwinding into the system is undefined behaviour.
pub(super) unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let message = convert_message(hwnd, msg, wparam, lparam);
        let system = Win32WindowSystem::new();
        dispatch_message(WindowRegistry::global(), &system, window_id(hwnd), &message)
    }));

    match result {
        Ok(code) => LRESULT(code),
        Err(_) => {
            tracing::error!(msg, "panic in window procedure");
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumb_track_carries_high_word_position() {
        let wparam = (123usize << 16) | SB_THUMBTRACK.0 as usize;
        assert_eq!(
            convert_scroll(Axis::Vertical, wparam),
            ScrollAction::ThumbTrack(123)
        );
    }

    #[test]
    fn line_codes_map_per_axis() {
        assert_eq!(
            convert_scroll(Axis::Horizontal, SB_LINERIGHT.0 as usize),
            ScrollAction::LineForward
        );
        assert_eq!(
            convert_scroll(Axis::Vertical, SB_LINEUP.0 as usize),
            ScrollAction::LineBackward
        );
    }

    #[test]
    fn size_message_unpacks_client_extent() {
        let lparam = (300isize << 16) | 400;
        assert_eq!(
            convert_resize(SIZE_RESTORED as usize, lparam),
            WindowEvent::Resize {
                kind: ResizeKind::Restored,
                width: 400,
                height: 300
            }
        );
    }
}
