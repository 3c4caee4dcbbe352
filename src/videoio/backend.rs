//! Capture backend capability and runtime backend selection.
//!
//! Backends are listed in a [`BackendRegistry`] together with a static `supported()` probe.
//! [`BackendRegistry::select`] picks the first supported one and falls back to
//! [`NullBackend`], which never opens. Missing hardware support is an expected deployment
//! condition, not a fault.

use crate::error::CaptureError;

/// Hardware/platform-specific capture implementation.
///
/// Fallible calls report failure only; callers do not inspect the error beyond logging it.
pub trait CaptureBackend: Send {
    fn name(&self) -> &'static str;

    /// Open device `index` asking for the given parameters. The backend may grant others.
    fn open(&mut self, index: i32, width: u32, height: u32, fps: u32) -> Result<(), CaptureError>;

    /// Negotiated frame width.
    fn width(&self) -> u32;

    /// Negotiated frame height.
    fn height(&self) -> u32;

    /// Negotiated frame rate.
    fn fps(&self) -> u32;

    fn start_streaming(&mut self) -> Result<(), CaptureError>;

    /// Block until a frame is available and write it as packed BGR into `buffer`.
    fn read_frame(&mut self, buffer: &mut [u8]) -> Result<(), CaptureError>;

    fn stop_streaming(&mut self) -> Result<(), CaptureError>;

    fn close(&mut self) -> Result<(), CaptureError>;
}

/// Registry entry: a name, an availability probe and a constructor.
#[derive(Clone, Copy)]
pub struct BackendDescriptor {
    pub name: &'static str,
    pub supported: fn() -> bool,
    pub create: fn() -> Box<dyn CaptureBackend>,
}

impl std::fmt::Debug for BackendDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendDescriptor")
            .field("name", &self.name)
            .finish()
    }
}

/// Ordered list of candidate backends.
#[derive(Debug, Clone, Default)]
pub struct BackendRegistry {
    backends: Vec<BackendDescriptor>,
}

impl BackendRegistry {
    /// Registry with no hardware backends; every selection yields [`NullBackend`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a candidate; earlier entries win.
    pub fn register(&mut self, descriptor: BackendDescriptor) -> &mut Self {
        self.backends.push(descriptor);
        self
    }

    pub fn with(mut self, descriptor: BackendDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.iter().map(|d| d.name)
    }

    /// Probe candidates in order and build the first supported backend.
    pub fn select(&self) -> Box<dyn CaptureBackend> {
        match self.backends.iter().find(|d| (d.supported)()) {
            Some(descriptor) => {
                tracing::debug!(backend = descriptor.name, "capture backend selected");
                (descriptor.create)()
            }
            None => {
                tracing::debug!("no supported capture backend, using null backend");
                Box::new(NullBackend)
            }
        }
    }
}

/// Backend used when nothing else is supported: every `open` fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend;

impl CaptureBackend for NullBackend {
    fn name(&self) -> &'static str {
        "null"
    }

    fn open(&mut self, _index: i32, _width: u32, _height: u32, _fps: u32) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn width(&self) -> u32 {
        0
    }

    fn height(&self) -> u32 {
        0
    }

    fn fps(&self) -> u32 {
        0
    }

    fn start_streaming(&mut self) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn read_frame(&mut self, _buffer: &mut [u8]) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn stop_streaming(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }
}
