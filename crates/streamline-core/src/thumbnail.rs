//! Cover rendering from the downloaded thumbnail

use crate::error::ThumbnailError;
use crate::workdir::Workdir;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// Probe order for the thumbnail yt-dlp wrote next to the audio file.
const THUMBNAIL_EXTENSIONS: &[&str] = &["jpg", "webp", "png"];

pub struct CoverRenderer {
    ffmpeg_path: PathBuf,
    size: u32,
}

impl CoverRenderer {
    pub fn new(ffmpeg_path: PathBuf, size: u32) -> Self {
        Self { ffmpeg_path, size }
    }

    /// Find the downloaded thumbnail and render it into the square cover
    /// image, overwriting any previous one.
    pub async fn render(&self, workdir: &Workdir) -> Result<PathBuf, ThumbnailError> {
        let thumbnail = locate_thumbnail(workdir)?;
        let cover = workdir.cover_file();

        info!("Rendering cover from: {}", thumbnail.display());

        let filter = crop_square_filter(self.size);
        let status = Command::new(&self.ffmpeg_path)
            .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(&thumbnail)
            .args(["-vf", &filter, "-frames:v", "1"])
            .arg(&cover)
            .status()
            .await?;

        if !status.success() {
            return Err(ThumbnailError::FfmpegFailed(status.code()));
        }

        debug!("Cover written to: {}", cover.display());
        Ok(cover)
    }
}

/// First existing `downloaded.<ext>` thumbnail, probing jpg, then webp, then
/// png. FFmpeg is never invoked when none exists.
pub fn locate_thumbnail(workdir: &Workdir) -> Result<PathBuf, ThumbnailError> {
    for ext in THUMBNAIL_EXTENSIONS {
        let candidate = workdir.thumbnail_candidate(ext);
        if candidate.exists() {
            debug!("Found thumbnail: {}", candidate.display());
            return Ok(candidate);
        }
    }
    Err(ThumbnailError::NotFound)
}

/// Centered square crop (side = the smaller input dimension) scaled to the
/// target size. The crop expressions are quoted so their commas are not taken
/// as filter-graph separators.
fn crop_square_filter(size: u32) -> String {
    format!("crop='min(in_w,in_h)':'min(in_w,in_h)',scale={size}:{size}")
}
