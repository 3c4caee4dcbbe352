//! Test-pattern capture source.
//!
//! Produces scrolling color bars without any hardware. Only registered when enabled in the
//! settings, so a default deployment still has no capture backend.

use crate::constants::SYNTHETIC_MAX_FPS;
use crate::error::CaptureError;

use super::backend::{BackendDescriptor, CaptureBackend};

// BGR: white, yellow, cyan, green, magenta, red, blue, black.
const BARS: [[u8; 3]; 8] = [
    [255, 255, 255],
    [0, 255, 255],
    [255, 255, 0],
    [0, 255, 0],
    [255, 0, 255],
    [0, 0, 255],
    [255, 0, 0],
    [0, 0, 0],
];

fn always_supported() -> bool {
    true
}

fn create_boxed() -> Box<dyn CaptureBackend> {
    Box::new(SyntheticBackend::new())
}

#[derive(Debug, Default)]
pub struct SyntheticBackend {
    opened: bool,
    streaming: bool,
    width: u32,
    height: u32,
    fps: u32,
    frame_index: u64,
}

impl SyntheticBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descriptor() -> BackendDescriptor {
        BackendDescriptor {
            name: "synthetic",
            supported: always_supported,
            create: create_boxed,
        }
    }

    /// Frames produced since streaming started.
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl CaptureBackend for SyntheticBackend {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn open(&mut self, index: i32, width: u32, height: u32, fps: u32) -> Result<(), CaptureError> {
        if index != 0 || self.opened {
            return Err(CaptureError::DeviceUnavailable(index));
        }
        // Packed YUV sources only come in even widths; mimic that negotiation.
        self.width = (width & !1).max(2);
        self.height = height.max(1);
        self.fps = fps.clamp(1, SYNTHETIC_MAX_FPS);
        self.opened = true;
        self.frame_index = 0;
        Ok(())
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fps(&self) -> u32 {
        self.fps
    }

    fn start_streaming(&mut self) -> Result<(), CaptureError> {
        if !self.opened {
            return Err(CaptureError::NotOpen);
        }
        self.streaming = true;
        Ok(())
    }

    fn read_frame(&mut self, buffer: &mut [u8]) -> Result<(), CaptureError> {
        if !self.streaming {
            return Err(CaptureError::Stream("not streaming".into()));
        }

        let width = self.width as usize;
        let row = width * 3;
        let needed = row * self.height as usize;
        if buffer.len() < needed {
            return Err(CaptureError::BufferTooSmall {
                needed,
                got: buffer.len(),
            });
        }

        let shift = self.frame_index as usize % width;
        for line in buffer[..needed].chunks_exact_mut(row) {
            for (x, pixel) in line.chunks_exact_mut(3).enumerate() {
                let bar = ((x + shift) % width) * BARS.len() / width;
                pixel.copy_from_slice(&BARS[bar]);
            }
        }

        self.frame_index += 1;
        Ok(())
    }

    fn stop_streaming(&mut self) -> Result<(), CaptureError> {
        self.streaming = false;
        Ok(())
    }

    fn close(&mut self) -> Result<(), CaptureError> {
        self.streaming = false;
        self.opened = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negotiates_even_width_and_capped_fps() {
        let mut backend = SyntheticBackend::new();
        backend.open(0, 641, 480, 240).unwrap();
        assert_eq!(backend.width(), 640);
        assert_eq!(backend.height(), 480);
        assert_eq!(backend.fps(), SYNTHETIC_MAX_FPS);
    }

    #[test]
    fn only_device_zero_exists() {
        let mut backend = SyntheticBackend::new();
        assert_eq!(
            backend.open(1, 640, 480, 30),
            Err(CaptureError::DeviceUnavailable(1))
        );
    }

    #[test]
    fn read_requires_streaming_and_room() {
        let mut backend = SyntheticBackend::new();
        backend.open(0, 8, 2, 30).unwrap();
        let mut buffer = vec![0u8; 8 * 2 * 3];
        assert!(backend.read_frame(&mut buffer).is_err());

        backend.start_streaming().unwrap();
        let mut small = vec![0u8; 10];
        assert_eq!(
            backend.read_frame(&mut small),
            Err(CaptureError::BufferTooSmall { needed: 48, got: 10 })
        );

        backend.read_frame(&mut buffer).unwrap();
        // One pixel per bar: first is white, last is black.
        assert_eq!(&buffer[0..3], &[255, 255, 255]);
        assert_eq!(&buffer[21..24], &[0, 0, 0]);
        assert_eq!(backend.frame_index(), 1);
    }
}
