mod common;

use std::cell::RefCell;
use std::sync::Arc;

use common::{Call, ScriptedSystem, leaked_registry};
use sc_highgui::platform::{
    HandlerRef, MessageTarget, ResizeKind, Size, TargetBox, WindowEvent, WindowId, WindowMessage,
    WindowSpec, WindowStyle,
};
use sc_highgui::ui::{Window, dispatch_message};

/// Records which identities its messages arrived for.
#[derive(Default)]
struct Recorder {
    seen: RefCell<Vec<WindowId>>,
}

impl MessageTarget for Recorder {
    fn handle_message(&self, window: WindowId, _message: &WindowMessage) -> Option<isize> {
        self.seen.borrow_mut().push(window);
        None
    }
}

/// Window plus the recorder registered for it.
struct Tracked {
    window: Window,
    recorder: TargetBox<Recorder>,
}

impl Tracked {
    fn new(system: Arc<ScriptedSystem>, registry: &'static sc_highgui::WindowRegistry<HandlerRef>) -> Self {
        Self {
            window: Window::new(system, registry),
            recorder: TargetBox::new(Recorder::default()),
        }
    }

    fn create(&self, title: &str) -> WindowId {
        let spec = WindowSpec::new(title, WindowStyle::BITMAP_VIEWER, Size::new(320, 200));
        self.window.create(&spec, self.recorder.handler()).unwrap()
    }

    fn seen(&self) -> Vec<WindowId> {
        self.recorder.get().seen.borrow().clone()
    }
}

fn creation_events() -> Vec<WindowEvent> {
    vec![
        WindowEvent::SizeQuery {
            frame: Size::new(16, 39),
            scrollbars: Size::new(17, 17),
        },
        WindowEvent::Resize {
            kind: ResizeKind::Restored,
            width: 304,
            height: 161,
        },
    ]
}

#[test]
fn messages_during_creation_reach_the_creating_window() {
    let registry = leaked_registry();
    let system = Arc::new(ScriptedSystem::new(registry).with_creation_events(creation_events()));
    let tracked = Tracked::new(Arc::clone(&system), registry);

    let id = tracked.create("tracked");
    assert_eq!(tracked.seen(), vec![id, id]);
    assert!(registry.contains(id));
    assert!(!registry.is_creating());
    assert_eq!(registry.resolve(id), Some(tracked.recorder.handler()));
}

#[test]
fn loop_exit_removes_identity() {
    let registry = leaked_registry();
    let system = Arc::new(
        ScriptedSystem::new(registry).with_loop_events(vec![WindowEvent::Other, WindowEvent::Destroyed]),
    );
    let tracked = Tracked::new(Arc::clone(&system), registry);
    let id = tracked.create("modal");

    let code = tracked.window.do_modal();
    assert_eq!(code, 0);
    assert!(!registry.contains(id));
    assert_eq!(tracked.window.identity(), None);
    assert_eq!(tracked.seen(), vec![id, id]);
    // Both declined messages took the base handling: default proc, then quit on destroy.
    let calls = system.calls();
    assert!(calls.contains(&Call::DefaultProc(0)));
    assert!(calls.contains(&Call::PostQuit(0)));
}

#[test]
fn failed_creation_leaves_no_trace() {
    let registry = leaked_registry();
    let system = Arc::new(ScriptedSystem::new(registry).failing_create());
    let tracked = Tracked::new(system, registry);

    let spec = WindowSpec::new("broken", WindowStyle::BITMAP_VIEWER, Size::new(10, 10));
    assert!(tracked.window.create(&spec, tracked.recorder.handler()).is_err());
    assert!(registry.is_empty());
    assert!(!registry.is_creating());
    assert_eq!(tracked.window.identity(), None);
}

#[test]
#[should_panic(expected = "called twice")]
fn creating_twice_panics() {
    let registry = leaked_registry();
    let system = Arc::new(ScriptedSystem::new(registry));
    let tracked = Tracked::new(system, registry);
    tracked.create("first");
    tracked.create("second");
}

#[test]
#[should_panic(expected = "before create")]
fn modal_loop_without_window_panics() {
    let registry = leaked_registry();
    let window = Window::new(Arc::new(ScriptedSystem::new(registry)), registry);
    window.do_modal();
}

#[test]
fn dropping_window_unregisters_once() {
    let registry = leaked_registry();
    let system = Arc::new(ScriptedSystem::new(registry));
    let tracked = Tracked::new(system, registry);
    let id = tracked.create("short-lived");
    drop(tracked);

    assert!(!registry.contains(id));
    assert!(!registry.unregister(id));
}

#[test]
fn center_window_moves_into_middle_of_work_area() {
    let registry = leaked_registry();
    let system = Arc::new(ScriptedSystem::new(registry));
    let tracked = Tracked::new(Arc::clone(&system), registry);
    let id = tracked.create("centered");

    tracked.window.center_window();
    assert!(system.calls().contains(&Call::Move(id, sc_highgui::platform::Point::new(800, 440))));
}

#[test]
fn unknown_identity_falls_back_to_default_processing() {
    let registry = leaked_registry();
    let system = ScriptedSystem::new(registry);
    let message = WindowMessage::synthetic(WindowEvent::Repaint);

    assert_eq!(
        dispatch_message(registry, &system, WindowId::from_raw(0xdead), &message),
        0
    );
    assert_eq!(system.calls(), vec![Call::DefaultProc(0)]);
}

#[test]
fn concurrent_creations_never_cross_assign() {
    let registry = leaked_registry();
    let system = Arc::new(ScriptedSystem::new(registry).with_creation_events(creation_events()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let system = Arc::clone(&system);
            std::thread::spawn(move || {
                let tracked = Tracked::new(system, registry);
                let id = tracked.create(&format!("window {i}"));
                let seen = tracked.seen();
                let own = seen.iter().all(|seen| *seen == id);
                (id, seen.len(), own)
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let (id, seen, own) = handle.join().unwrap();
        assert_eq!(seen, 2);
        assert!(own);
        ids.push(id);
    }
    ids.sort_by_key(|id| id.raw());
    ids.dedup();
    assert_eq!(ids.len(), 8);
    // Every window was dropped at the end of its thread.
    assert!(registry.is_empty());
}
