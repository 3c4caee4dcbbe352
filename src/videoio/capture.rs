use tracing::{debug, error, info, warn};

use crate::constants::{DEFAULT_FPS, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};
use crate::image::{Mat, MatType};
use crate::settings::Settings;

use super::backend::{BackendRegistry, CaptureBackend};
use super::properties::CaptureProperty;
use super::synthetic::SyntheticBackend;

/// Width, height and frame rate of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureParameters {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl CaptureParameters {
    /// Values reported while no session is open.
    pub const BASELINE: CaptureParameters = CaptureParameters {
        width: DEFAULT_FRAME_WIDTH,
        height: DEFAULT_FRAME_HEIGHT,
        fps: DEFAULT_FPS,
    };

    pub fn get(&self, property: CaptureProperty) -> u32 {
        match property {
            CaptureProperty::FrameWidth => self.width,
            CaptureProperty::FrameHeight => self.height,
            CaptureProperty::Fps => self.fps,
        }
    }

    pub fn set(&mut self, property: CaptureProperty, value: u32) {
        match property {
            CaptureProperty::FrameWidth => self.width = value,
            CaptureProperty::FrameHeight => self.height = value,
            CaptureProperty::Fps => self.fps = value,
        }
    }
}

impl Default for CaptureParameters {
    fn default() -> Self {
        Self::BASELINE
    }
}

/// Backend registry described by the settings.
pub fn backend_registry(settings: &Settings) -> BackendRegistry {
    let mut registry = BackendRegistry::empty();
    if settings.capture.synthetic_source {
        registry.register(SyntheticBackend::descriptor());
    }
    registry
}

/// Video capture facade.
///
/// Selects a backend when opened, keeps the negotiated parameters and pulls frames into
/// caller-owned [`Mat`]s. Every lifecycle call is safe to repeat.
pub struct VideoCapture {
    registry: BackendRegistry,
    backend: Option<Box<dyn CaptureBackend>>,
    requested: CaptureParameters,
    current: CaptureParameters,
    opened: bool,
}

impl VideoCapture {
    /// Facade with default settings: baseline parameters and no synthetic source.
    ///
    /// Touches no settings file; use [`VideoCapture::from_settings`] with
    /// [`ConfigManager::get`](crate::config::ConfigManager::get) for file-backed settings.
    pub fn new() -> Self {
        Self::from_settings(&Settings::default())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut capture = Self::with_registry(backend_registry(settings));
        capture.requested = CaptureParameters {
            width: settings.capture.default_width,
            height: settings.capture.default_height,
            fps: settings.capture.default_fps,
        };
        capture
    }

    pub fn with_registry(registry: BackendRegistry) -> Self {
        Self {
            registry,
            backend: None,
            requested: CaptureParameters::BASELINE,
            current: CaptureParameters::BASELINE,
            opened: false,
        }
    }

    /// Open capture device `index`. An open session is released first.
    pub fn open(&mut self, index: i32) -> bool {
        if self.opened {
            self.release();
        }

        let mut backend = self.registry.select();
        let requested = self.requested;
        if let Err(e) = backend.open(index, requested.width, requested.height, requested.fps) {
            info!(backend = backend.name(), index, "capture device not opened: {e}");
            return false;
        }

        let negotiated = CaptureParameters {
            width: backend.width(),
            height: backend.height(),
            fps: backend.fps(),
        };
        if negotiated != requested {
            debug!(?requested, ?negotiated, "backend adjusted capture parameters");
        }

        if let Err(e) = backend.start_streaming() {
            error!(backend = backend.name(), index, "start streaming failed: {e}");
            if let Err(e) = backend.close() {
                warn!(backend = backend.name(), "close after failed start: {e}");
            }
            return false;
        }

        info!(
            backend = backend.name(),
            index,
            width = negotiated.width,
            height = negotiated.height,
            fps = negotiated.fps,
            "capture opened"
        );
        self.current = negotiated;
        self.backend = Some(backend);
        self.opened = true;
        true
    }

    #[inline]
    pub fn is_opened(&self) -> bool {
        self.opened
    }

    /// Stop and close the backend, then restore the baseline parameters.
    pub fn release(&mut self) {
        if !self.opened {
            return;
        }

        if let Some(mut backend) = self.backend.take() {
            if let Err(e) = backend.stop_streaming() {
                warn!(backend = backend.name(), "stop streaming failed: {e}");
            }
            if let Err(e) = backend.close() {
                warn!(backend = backend.name(), "close failed: {e}");
            }
            debug!(backend = backend.name(), "capture released");
        }

        self.opened = false;
        self.current = CaptureParameters::BASELINE;
    }

    /// Pull one frame into `frame`, sized to the negotiated dimensions as packed BGR.
    ///
    /// Leaves `frame` untouched and returns `false` when nothing is open.
    pub fn read(&mut self, frame: &mut Mat) -> bool {
        if !self.opened {
            return false;
        }
        let Some(backend) = self.backend.as_mut() else {
            return false;
        };

        frame.create(
            self.current.height as i32,
            self.current.width as i32,
            MatType::CV_8UC3,
        );
        match backend.read_frame(frame.data_mut()) {
            Ok(()) => true,
            Err(e) => {
                warn!(backend = backend.name(), "frame read failed: {e}");
                false
            }
        }
    }

    /// Update the parameters requested by the next [`open`](Self::open).
    ///
    /// A running session is not affected. Unknown ids are logged and still report success so
    /// generic property loops keep going.
    pub fn set(&mut self, prop_id: i32, value: f64) -> bool {
        match CaptureProperty::from_id(prop_id) {
            Some(property) => {
                self.requested.set(property, value.max(0.0).round() as u32);
                true
            }
            None => {
                warn!(prop_id, value, "unsupported capture property ignored");
                true
            }
        }
    }

    /// Current value of a property: negotiated while open, baseline otherwise. Unknown ids
    /// return `0.0`.
    pub fn get(&self, prop_id: i32) -> f64 {
        match CaptureProperty::from_id(prop_id) {
            Some(property) => self.current.get(property) as f64,
            None => {
                warn!(prop_id, "unsupported capture property queried");
                0.0
            }
        }
    }

    /// Parameters the next open will ask for.
    #[inline]
    pub fn requested(&self) -> CaptureParameters {
        self.requested
    }

    /// Name of the backend driving the open session.
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.name())
    }
}

impl Default for VideoCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for VideoCapture {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::videoio::{CAP_PROP_FPS, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH};

    fn synthetic() -> VideoCapture {
        VideoCapture::with_registry(BackendRegistry::empty().with(SyntheticBackend::descriptor()))
    }

    #[test]
    fn default_constructor_uses_in_memory_defaults() {
        let mut cap = VideoCapture::new();
        assert_eq!(cap.requested(), CaptureParameters::BASELINE);
        assert_eq!(cap.registry.names().count(), 0);
        assert!(!cap.open(0));
        assert_eq!(cap.backend_name(), None);
    }

    #[test]
    fn release_on_fresh_capture_keeps_baseline() {
        let mut cap = VideoCapture::with_registry(BackendRegistry::empty());
        cap.release();
        cap.release();
        assert!(!cap.is_opened());
        assert_eq!(cap.get(CAP_PROP_FRAME_WIDTH), 640.0);
        assert_eq!(cap.get(CAP_PROP_FRAME_HEIGHT), 480.0);
        assert_eq!(cap.get(CAP_PROP_FPS), 30.0);
    }

    #[test]
    fn unsupported_platform_never_opens() {
        let mut cap = VideoCapture::with_registry(BackendRegistry::empty());
        assert!(cap.set(CAP_PROP_FRAME_WIDTH, 1280.0));
        assert!(cap.set(CAP_PROP_FRAME_HEIGHT, 720.0));
        assert!(!cap.open(0));
        assert!(!cap.is_opened());
        assert_eq!(cap.get(CAP_PROP_FRAME_WIDTH), 640.0);
        assert_eq!(cap.backend_name(), None);
    }

    #[test]
    fn negotiated_width_wins_over_requested() {
        let mut cap = synthetic();
        cap.set(CAP_PROP_FRAME_WIDTH, 1281.0);
        assert!(cap.open(0));
        assert_eq!(cap.get(CAP_PROP_FRAME_WIDTH), 1280.0);
        assert_eq!(cap.requested().width, 1281);
        assert_eq!(cap.backend_name(), Some("synthetic"));
    }

    #[test]
    fn read_sizes_frame_to_negotiated_dimensions() {
        let mut cap = synthetic();
        cap.set(CAP_PROP_FRAME_WIDTH, 32.0);
        cap.set(CAP_PROP_FRAME_HEIGHT, 16.0);
        assert!(cap.open(0));

        let mut frame = Mat::default();
        assert!(cap.read(&mut frame));
        assert_eq!((frame.rows(), frame.cols(), frame.channels()), (16, 32, 3));
    }

    #[test]
    fn read_when_closed_leaves_frame_untouched() {
        let mut cap = synthetic();
        let mut frame = Mat::new(2, 2, MatType::CV_8UC3);
        frame.data_mut()[0] = 9;
        assert!(!cap.read(&mut frame));
        assert_eq!((frame.rows(), frame.cols()), (2, 2));
        assert_eq!(frame.data()[0], 9);
    }

    #[test]
    fn unknown_property_is_permissive() {
        let mut cap = synthetic();
        assert!(cap.set(42, 7.0));
        assert_eq!(cap.requested(), CaptureParameters::BASELINE);
        assert_eq!(cap.get(42), 0.0);
    }

    #[test]
    fn release_restores_baseline_after_session() {
        let mut cap = synthetic();
        cap.set(CAP_PROP_FPS, 50.0);
        assert!(cap.open(0));
        assert_eq!(cap.get(CAP_PROP_FPS), 50.0);
        cap.release();
        assert_eq!(cap.get(CAP_PROP_FPS), 30.0);
        assert!(!cap.is_opened());
    }
}
