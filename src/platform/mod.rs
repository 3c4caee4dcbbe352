//! Platform abstraction layer
//!
//! # Module layout
//! - [`traits`]: platform-neutral geometry, window ids and the [`WindowSystem`] seam
//! - [`events`]: window events the bitmap viewport reacts to
//! - [`registry`]: process-wide identity → owner routing
//! - [`windows`]: Win32 implementation (window procedure, message loop, GDI blit)

pub mod events;
pub mod registry;
pub mod traits;

#[cfg(windows)]
pub mod windows;

pub use events::*;
pub use registry::{HandlerRef, MessageTarget, PendingCreation, TargetBox, WindowRegistry};
pub use traits::*;

#[cfg(windows)]
pub use windows::Win32WindowSystem;
