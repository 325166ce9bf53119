//! Staging directory layout and cleanup

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name stem shared by every audio-mode artifact yt-dlp writes.
pub const STAGING_STEM: &str = "downloaded";
/// File name stem for the video-mode product. Cleanup must not touch it.
pub const VIDEO_STEM: &str = "video_downloaded";
/// Processed cover image written next to the staging artifacts.
pub const COVER_FILE: &str = "cover.jpg";

/// Extensions cleanup matches under the `downloaded` stem.
const CLEANUP_EXTENSIONS: &[&str] = &["mp3", "mp4", "webm", "webp", "jpg", "json", "png"];

/// Handle on the staging directory holding one job's fixed-name files.
///
/// The fixed names mean at most one job can use a directory at a time;
/// concurrent invocations against the same staging directory are unsupported.
#[derive(Debug, Clone)]
pub struct Workdir {
    root: PathBuf,
}

impl Workdir {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The extracted audio file produced in music mode.
    pub fn audio_file(&self) -> PathBuf {
        self.root.join(format!("{STAGING_STEM}.mp3"))
    }

    /// The JSON metadata sidecar written next to the audio file.
    pub fn sidecar_file(&self) -> PathBuf {
        self.root.join(format!("{STAGING_STEM}.info.json"))
    }

    /// The processed square cover image.
    pub fn cover_file(&self) -> PathBuf {
        self.root.join(COVER_FILE)
    }

    /// yt-dlp output template for music mode (extension filled in by the tool).
    pub fn audio_template(&self) -> String {
        format!("{STAGING_STEM}.%(ext)s")
    }

    /// yt-dlp output template for video mode.
    pub fn video_template(&self) -> String {
        format!("{VIDEO_STEM}.%(ext)s")
    }

    /// Thumbnail candidate with the given extension.
    pub fn thumbnail_candidate(&self, ext: &str) -> PathBuf {
        self.root.join(format!("{STAGING_STEM}.{ext}"))
    }

    /// Remove every staging artifact: `downloaded*.{mp3,mp4,webm,webp,jpg,json,png}`
    /// plus `cover.jpg`. The video product and unrelated files are left alone.
    /// Running this on a directory with nothing to remove is fine.
    ///
    /// Returns the number of files removed.
    pub fn clean(&self) -> std::io::Result<usize> {
        let mut removed = 0;

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if is_staging_artifact(&path) {
                debug!("Removing: {}", path.display());
                fs::remove_file(&path)?;
                removed += 1;
            }
        }

        let cover = self.cover_file();
        if cover.exists() {
            debug!("Removing: {}", cover.display());
            fs::remove_file(&cover)?;
            removed += 1;
        }

        Ok(removed)
    }
}

/// Whether a file matches `downloaded*.<ext>` for the cleanup extension set.
/// The match is anchored at the start of the name, so `video_downloaded.mp4`
/// stays.
fn is_staging_artifact(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !name.starts_with(STAGING_STEM) {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CLEANUP_EXTENSIONS.contains(&ext))
}
