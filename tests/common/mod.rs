#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use sc_highgui::error::PlatformError;
use sc_highgui::image::BitmapView;
use sc_highgui::platform::{
    Axis, HandlerRef, Point, RawMessage, Rect, Size, WindowEvent, WindowId, WindowMessage,
    WindowRegistry, WindowSpec, WindowSystem,
};
use sc_highgui::ui::dispatch_message;

/// Everything the scripted window system was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { title: String, size: Size },
    Move(WindowId, Point),
    EnableScrollBar(Axis, bool),
    SetScrollRange(Axis, i32, i32),
    SetScrollPos(Axis, i32),
    Invalidate,
    Paint { origin: Point, size: Size },
    MaxTrackSize(Size),
    DefaultProc(u32),
    PostQuit(i32),
    ShowError(String),
}

/// In-memory window system.
///
/// `create_window` dispatches the configured creation events before returning, like the native
/// system does; `run_modal_loop` replays the loop events until a quit is posted.
pub struct ScriptedSystem {
    registry: &'static WindowRegistry<HandlerRef>,
    next_id: AtomicUsize,
    window_size: Mutex<Size>,
    creation_events: Vec<WindowEvent>,
    loop_events: Mutex<VecDeque<WindowEvent>>,
    quit: Mutex<Option<i32>>,
    fail_create: bool,
    dpi_scale: f32,
    work_area: Rect,
    pub calls: Mutex<Vec<Call>>,
}

/// Every registry handed out, reachable for the whole test run.
static REGISTRIES: Mutex<Vec<&'static WindowRegistry<HandlerRef>>> = Mutex::new(Vec::new());

/// Fresh registry per test so assertions on its contents are isolated.
pub fn leaked_registry() -> &'static WindowRegistry<HandlerRef> {
    let registry: &'static WindowRegistry<HandlerRef> = Box::leak(Box::new(WindowRegistry::new()));
    REGISTRIES.lock().push(registry);
    registry
}

impl ScriptedSystem {
    pub fn new(registry: &'static WindowRegistry<HandlerRef>) -> Self {
        Self {
            registry,
            next_id: AtomicUsize::new(0x100),
            window_size: Mutex::new(Size::default()),
            creation_events: Vec::new(),
            loop_events: Mutex::new(VecDeque::new()),
            quit: Mutex::new(None),
            fail_create: false,
            dpi_scale: 1.0,
            work_area: Rect::new(0, 0, 1920, 1080),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_creation_events(mut self, events: Vec<WindowEvent>) -> Self {
        self.creation_events = events;
        self
    }

    pub fn with_loop_events(self, events: Vec<WindowEvent>) -> Self {
        *self.loop_events.lock() = events.into();
        self
    }

    pub fn with_dpi_scale(mut self, scale: f32) -> Self {
        self.dpi_scale = scale;
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn dispatch(&self, window: WindowId, event: WindowEvent) -> isize {
        dispatch_message(self.registry, self, window, &WindowMessage::synthetic(event))
    }
}

impl WindowSystem for ScriptedSystem {
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowId, PlatformError> {
        if self.fail_create {
            return Err(PlatformError::Windows("CreateWindowExW failed".into()));
        }
        self.record(Call::Create {
            title: spec.title.clone(),
            size: spec.size,
        });
        *self.window_size.lock() = spec.size;

        let window = WindowId::from_raw(self.next_id.fetch_add(1, Ordering::SeqCst));
        for event in &self.creation_events {
            self.dispatch(window, *event);
        }
        Ok(window)
    }

    fn run_modal_loop(&self, window: WindowId) -> i32 {
        loop {
            if let Some(code) = *self.quit.lock() {
                return code;
            }
            let next = self.loop_events.lock().pop_front();
            match next {
                Some(event) => {
                    self.dispatch(window, event);
                }
                None => return 0,
            }
        }
    }

    fn post_quit(&self, code: i32) {
        self.record(Call::PostQuit(code));
        *self.quit.lock() = Some(code);
    }

    fn default_proc(&self, _window: WindowId, raw: RawMessage) -> isize {
        self.record(Call::DefaultProc(raw.msg));
        0
    }

    fn window_rect(&self, _window: WindowId) -> Rect {
        let size = *self.window_size.lock();
        Rect::new(0, 0, size.width, size.height)
    }

    fn client_rect(&self, window: WindowId) -> Rect {
        self.window_rect(window)
    }

    fn work_area(&self) -> Rect {
        self.work_area
    }

    fn move_window(&self, window: WindowId, origin: Point) {
        self.record(Call::Move(window, origin));
    }

    fn dpi_scale(&self) -> f32 {
        self.dpi_scale
    }

    fn enable_scroll_bar(&self, _window: WindowId, axis: Axis, enabled: bool) {
        self.record(Call::EnableScrollBar(axis, enabled));
    }

    fn set_scroll_range(&self, _window: WindowId, axis: Axis, min: i32, max: i32) {
        self.record(Call::SetScrollRange(axis, min, max));
    }

    fn set_scroll_pos(&self, _window: WindowId, axis: Axis, pos: i32) {
        self.record(Call::SetScrollPos(axis, pos));
    }

    fn invalidate(&self, _window: WindowId) {
        self.record(Call::Invalidate);
    }

    fn paint_bitmap(&self, _window: WindowId, _bitmap: &BitmapView<'_>, origin: Point, size: Size) {
        self.record(Call::Paint { origin, size });
    }

    fn set_max_track_size(&self, _raw: RawMessage, size: Size) {
        self.record(Call::MaxTrackSize(size));
    }

    fn show_error(&self, _title: &str, message: &str) {
        self.record(Call::ShowError(message.to_string()));
    }
}
