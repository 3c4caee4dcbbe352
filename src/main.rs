//! Demo: show a BMP file, or one captured frame, in a scrollable bitmap window.
//!
//! ```text
//! sc_highgui [image.bmp]
//! ```
//!
//! Without an argument the first capture device is opened (enable `capture.synthetic_source` in
//! the settings file to get a test pattern without hardware).

use anyhow::{Context, Result, bail};
use tracing::info;

use sc_highgui::config::ConfigManager;
use sc_highgui::settings::Settings;
use sc_highgui::{CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH, Mat, VideoCapture, logging};

fn capture_frame(config: &ConfigManager) -> Result<Vec<u8>> {
    let mut capture = VideoCapture::from_settings(&config.get());
    if !capture.open(0) {
        bail!("no capture device available");
    }
    info!(
        backend = capture.backend_name().unwrap_or("none"),
        width = capture.get(CAP_PROP_FRAME_WIDTH),
        height = capture.get(CAP_PROP_FRAME_HEIGHT),
        "capturing one frame"
    );

    let mut frame = Mat::default();
    if !capture.read(&mut frame) {
        bail!("frame read failed");
    }
    capture.release();
    Ok(frame.to_bmp())
}

#[cfg(windows)]
fn show(bytes: &[u8], title: &str) -> Result<()> {
    use std::sync::Arc;

    use sc_highgui::platform::{Size, Win32WindowSystem, WindowRegistry};
    use sc_highgui::ui::BitmapWindow;

    let (width, height) = ConfigManager::global().logical_size();
    let window = BitmapWindow::new(
        bytes,
        Arc::new(Win32WindowSystem::new()),
        WindowRegistry::global(),
    )?
    .with_logical_size(Size::new(width, height));

    let code = window.show(title)?;
    info!(code, "window closed");
    Ok(())
}

#[cfg(not(windows))]
fn show(bytes: &[u8], title: &str) -> Result<()> {
    let bitmap = sc_highgui::BitmapView::parse(bytes)?;
    info!(
        title,
        width = bitmap.width(),
        height = bitmap.height(),
        bit_count = bitmap.bit_count(),
        "no native window system on this platform"
    );
    Ok(())
}

fn main() -> Result<()> {
    logging::init(&logging::startup_filter(&Settings::settings_path()));
    info!("sc_highgui v{}", env!("CARGO_PKG_VERSION"));
    let config = ConfigManager::global();

    match std::env::args().nth(1) {
        Some(path) => {
            let bytes = std::fs::read(&path).with_context(|| format!("reading {path}"))?;
            show(&bytes, &path)
        }
        None => {
            let bytes = capture_frame(config)?;
            show(&bytes, "Capture")
        }
    }
}
