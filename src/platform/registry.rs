//! Process-wide window registry.
//!
//! Maps native window identities to the object that handles their messages. The registry never
//! owns a window; it only resolves inbound messages to an existing owner.
//!
//! # Creation protocol
//!
//! A native window emits messages before its creation call returns, i.e. before its identity is
//! known. Creation therefore runs in two phases:
//!
//! ```text
//! reserve(owner)          -> creation lock taken, pending slot = owner
//!   native create call    -> messages for unknown identities resolve to the pending owner
//! commit(identity)        -> map[identity] = owner, pending slot cleared, lock released
//! ```
//!
//! Dropping an uncommitted [`PendingCreation`] clears the slot, so a failed creation leaves no
//! trace. The creation lock serializes window creation across threads; map lookups take a
//! separate short-lived lock so dispatch during creation (same thread) cannot deadlock.
//! Nested creation from inside a creation message is not supported.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::ptr::NonNull;
use std::sync::OnceLock;

use parking_lot::{Mutex, MutexGuard};

use super::events::WindowMessage;
use super::traits::WindowId;

/// Object that receives the messages of a registered window.
///
/// Messages can arrive while the owner is inside one of its own window calls (creation, the
/// modal loop), so targets take `&self` and keep mutable state behind interior mutability.
pub trait MessageTarget {
    /// Return `Some(result)` when handled, `None` to fall back to default processing.
    fn handle_message(&self, window: WindowId, message: &WindowMessage) -> Option<isize>;
}

type DispatchFn = unsafe fn(NonNull<()>, WindowId, &WindowMessage) -> Option<isize>;

/// Non-owning, type-erased reference to a [`MessageTarget`].
#[derive(Clone, Copy)]
pub struct HandlerRef {
    target: NonNull<()>,
    dispatch: DispatchFn,
}

// SAFETY: a HandlerRef is only dereferenced on the thread running the owner's modal loop, and
// the owner removes it from the registry before the referenced object goes away.
unsafe impl Send for HandlerRef {}
unsafe impl Sync for HandlerRef {}

impl HandlerRef {
    /// Erase `target` into a handler reference.
    ///
    /// The caller must unregister the reference before `target` is moved or dropped. Owners
    /// that stay in use while registered should keep the target in a [`TargetBox`].
    pub fn new<T: MessageTarget>(target: &T) -> Self {
        Self::erase(NonNull::from(target))
    }

    fn erase<T: MessageTarget>(target: NonNull<T>) -> Self {
        unsafe fn thunk<T: MessageTarget>(
            target: NonNull<()>,
            window: WindowId,
            message: &WindowMessage,
        ) -> Option<isize> {
            // SAFETY: `target` points at a live `T`; only shared references are ever formed.
            let target = unsafe { target.cast::<T>().as_ref() };
            target.handle_message(window, message)
        }

        Self {
            target: target.cast(),
            dispatch: thunk::<T>,
        }
    }

    /// Forward a message to the referenced target.
    ///
    /// # Safety
    /// The target must still be alive.
    pub unsafe fn call(self, window: WindowId, message: &WindowMessage) -> Option<isize> {
        unsafe { (self.dispatch)(self.target, window, message) }
    }

    /// Address of the referenced object, for identity comparisons.
    pub fn addr(self) -> usize {
        self.target.as_ptr() as usize
    }
}

/// Heap-allocated message target reached only through a raw pointer.
///
/// The allocation is never covered by a reference into the owning struct, so handler
/// references stay valid while the owner is borrowed, mutably or not, during creation and the
/// modal loop. Declare the box after the [`Window`](crate::ui::Window) that registers it, so
/// the identity is unregistered before the target is freed.
pub struct TargetBox<T: MessageTarget> {
    ptr: NonNull<T>,
    _owns: PhantomData<T>,
}

impl<T: MessageTarget> TargetBox<T> {
    pub fn new(target: T) -> Self {
        Self {
            ptr: NonNull::from(Box::leak(Box::new(target))),
            _owns: PhantomData,
        }
    }

    #[inline]
    pub fn get(&self) -> &T {
        // SAFETY: the allocation lives until drop and is only shared, never uniquely borrowed.
        unsafe { self.ptr.as_ref() }
    }

    /// Handler reference to register for the boxed target.
    #[inline]
    pub fn handler(&self) -> HandlerRef {
        HandlerRef::erase(self.ptr)
    }
}

impl<T: MessageTarget> Drop for TargetBox<T> {
    fn drop(&mut self) {
        // SAFETY: `ptr` came from `Box::leak` in `new` and is freed exactly once.
        drop(unsafe { Box::from_raw(self.ptr.as_ptr()) });
    }
}

impl PartialEq for HandlerRef {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for HandlerRef {}

impl std::fmt::Debug for HandlerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HandlerRef({:#x})", self.addr())
    }
}

struct RegistryState<T> {
    windows: HashMap<WindowId, T>,
    pending: Option<T>,
}

/// Identity → owner mapping with a single pending-creation slot.
pub struct WindowRegistry<T> {
    creation: Mutex<()>,
    state: Mutex<RegistryState<T>>,
}

impl<T: Copy> Default for WindowRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> WindowRegistry<T> {
    pub fn new() -> Self {
        Self {
            creation: Mutex::new(()),
            state: Mutex::new(RegistryState {
                windows: HashMap::new(),
                pending: None,
            }),
        }
    }

    /// Phase 1 of creation: take the creation lock and park `owner` in the pending slot.
    ///
    /// Blocks while another thread is creating a window.
    pub fn reserve(&self, owner: T) -> PendingCreation<'_, T> {
        let guard = self.creation.lock();
        self.state.lock().pending = Some(owner);
        PendingCreation {
            registry: self,
            owner,
            committed: false,
            _creation: guard,
        }
    }

    /// Owner of `window`, or the pending owner while a creation is in flight.
    pub fn resolve(&self, window: WindowId) -> Option<T> {
        let state = self.state.lock();
        state.windows.get(&window).copied().or(state.pending)
    }

    /// Insert `owner` under `window`, returning a previous owner if one was mapped.
    ///
    /// Two owners for one identity break routing for the first one; callers must never do this.
    pub fn register(&self, window: WindowId, owner: T) -> Option<T> {
        let previous = self.state.lock().windows.insert(window, owner);
        if previous.is_some() {
            tracing::error!(window = window.raw(), "identity registered twice");
        }
        previous
    }

    /// Remove `window`. Returns `false` when it was not registered.
    pub fn unregister(&self, window: WindowId) -> bool {
        self.state.lock().windows.remove(&window).is_some()
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.state.lock().windows.contains_key(&window)
    }

    /// Whether a creation currently holds the pending slot.
    pub fn is_creating(&self) -> bool {
        self.state.lock().pending.is_some()
    }

    pub fn len(&self) -> usize {
        self.state.lock().windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WindowRegistry<HandlerRef> {
    /// Default process-wide instance used by the native window procedure.
    pub fn global() -> &'static WindowRegistry<HandlerRef> {
        static GLOBAL: OnceLock<WindowRegistry<HandlerRef>> = OnceLock::new();
        GLOBAL.get_or_init(WindowRegistry::new)
    }
}

/// In-flight creation; see the module docs.
pub struct PendingCreation<'a, T: Copy> {
    registry: &'a WindowRegistry<T>,
    owner: T,
    committed: bool,
    _creation: MutexGuard<'a, ()>,
}

impl<T: Copy> PendingCreation<'_, T> {
    /// Phase 3: bind the owner to its final identity and clear the pending slot.
    pub fn commit(mut self, window: WindowId) {
        let mut state = self.registry.state.lock();
        state.windows.insert(window, self.owner);
        state.pending = None;
        self.committed = true;
    }
}

impl<T: Copy> Drop for PendingCreation<'_, T> {
    fn drop(&mut self) {
        if !self.committed {
            self.registry.state.lock().pending = None;
        }
    }
}
