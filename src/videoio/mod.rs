//! Video capture facade over pluggable backends.
//!
//! ```text
//! VideoCapture::open(index)
//!   │  BackendRegistry::select()  (first supported backend, else NullBackend)
//!   ▼
//! backend.open(requested w, h, fps)
//!   │  read back negotiated w, h, fps
//!   ▼
//! backend.start_streaming()       (failure → backend.close())
//!   ▼
//! VideoCapture::read(&mut Mat)    → backend.read_frame(buffer)
//! ```

mod backend;
mod capture;
mod properties;
mod synthetic;

pub use backend::{BackendDescriptor, BackendRegistry, CaptureBackend, NullBackend};
pub use capture::{CaptureParameters, VideoCapture, backend_registry};
pub use properties::{CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH, CaptureProperty};
pub use synthetic::SyntheticBackend;
