//! Operational helpers: logging setup and frame persistence.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;
use image::RgbImage;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use watermark_types::{config::OpsConfig, PixelBuffer, Result, WatermarkError};

/// Installs the global subscriber. Logs go to stderr so stdout stays free for
/// machine-readable output.
pub fn init_tracing(config: &OpsConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.log_level.clone())
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|err| WatermarkError::Ops(format!("failed to create log filter: {err}")))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| WatermarkError::Ops(format!("tracing init error: {err}")))?;
    Ok(())
}

/// Encodes the frame as PNG at `path`.
pub fn save_png<P: AsRef<Path>>(path: P, frame: &PixelBuffer) -> Result<()> {
    let path = path.as_ref();
    let Some(image) =
        RgbImage::from_raw(frame.width(), frame.height(), frame.as_bytes().to_vec())
    else {
        return Err(export_error("failed to build image buffer"));
    };
    image
        .save(path)
        .map_err(|err| export_error(format!("failed to save frame {}: {err}", path.display())))
}

/// Writes the frame into `dir` under a name derived from its PTS and the
/// current time, creating the directory when needed.
pub fn persist_frame<P: AsRef<Path>>(dir: P, frame: &PixelBuffer) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|err| {
        export_error(format!(
            "failed to create output dir {}: {err}",
            dir.display()
        ))
    })?;
    let timestamp = Utc::now().format("%Y%m%d_%H%M%S_%3f");
    let path = dir.join(format!("frame_{}_{}.png", frame.pts(), timestamp));
    save_png(&path, frame)?;
    info!("Stamped frame written to {:?}", path);
    Ok(path)
}

pub fn export_error(message: impl Into<String>) -> WatermarkError {
    WatermarkError::Export(message.into())
}
