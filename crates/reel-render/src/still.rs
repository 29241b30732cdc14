//! PNG export of rendered scene frames.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use reel_core::{FrameBuffer, ReelError, ReelResult};

use crate::scenes::SceneKind;

/// File name of a scene still: `NN-<label>.png`, numbered from 1 in playback order.
pub fn still_name(position: usize, kind: SceneKind) -> String {
    format!("{:02}-{}.png", position + 1, kind.label())
}

/// Encode a frame as PNG at `path`.
pub fn save_png(frame: &FrameBuffer, path: &Path) -> ReelResult<()> {
    let img = RgbImage::from_raw(frame.width, frame.height, frame.data.clone()).ok_or_else(|| {
        ReelError::Render(format!(
            "frame buffer of {} bytes does not match {}",
            frame.data.len(),
            frame.size()
        ))
    })?;
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| ReelError::output(format!("failed to write PNG: {}", e), path))
}

/// Write every scene frame into `dir`, which must already exist.
/// Returns the written paths in playback order.
pub fn write_stills(dir: &Path, frames: &[(SceneKind, &FrameBuffer)]) -> ReelResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReelError::output("stills directory does not exist", dir));
    }
    let mut written = Vec::with_capacity(frames.len());
    for (position, (kind, frame)) in frames.iter().enumerate() {
        let path = dir.join(still_name(position, *kind));
        save_png(frame, &path)?;
        tracing::debug!("wrote still {}", path.display());
        written.push(path);
    }
    Ok(written)
}
