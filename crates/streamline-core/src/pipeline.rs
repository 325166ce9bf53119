//! Pipeline orchestration for the music and video flows

use crate::config::Config;
use crate::downloader::Downloader;
use crate::error::{ConfigError, StreamlineError};
use crate::progress::DownloadEvent;
use crate::sidecar::{Sidecar, TrackTags};
use crate::tagger;
use crate::thumbnail::CoverRenderer;
use crate::workdir::Workdir;

use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Everything a pipeline run needs, resolved up front.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub staging_dir: PathBuf,
    pub output_dir: PathBuf,
    pub cover_size: u32,
    pub yt_dlp: PathBuf,
    pub ffmpeg: PathBuf,
}

impl PipelineConfig {
    /// Resolve directories and tool paths from the loaded configuration.
    pub fn resolve(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            staging_dir: config.staging_dir()?,
            output_dir: config.output.directory.clone(),
            cover_size: config.cover.size,
            yt_dlp: config.yt_dlp_path()?,
            ffmpeg: config.ffmpeg_path()?,
        })
    }
}

/// Pipeline progress stages
#[derive(Debug, Clone)]
pub enum PipelineStage {
    Fetching(DownloadEvent),
    RenderingCover,
    WritingTags { artist: String, title: String },
    Saving,
    Cleaning,
    Complete { output: Option<PathBuf>, duration: Duration },
    Failed { stage: String, error: String },
}

/// Sequential orchestration of one download job.
pub struct Pipeline {
    config: PipelineConfig,
    progress_tx: mpsc::Sender<PipelineStage>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, progress_tx: mpsc::Sender<PipelineStage>) -> Self {
        Self { config, progress_tx }
    }

    /// Music flow: download and extract audio, render the cover, embed tags,
    /// move the result into the output directory.
    ///
    /// Staging artifacts are left in place afterwards; `clean` scrubs them.
    pub async fn run_music(&self, url: &str) -> Result<PathBuf, StreamlineError> {
        let start_time = Instant::now();
        let workdir = self.workdir();

        info!("Starting music job for: {}", url);
        debug!("Staging directory: {}", workdir.root().display());

        // 1. Download audio plus sidecar and thumbnail
        let downloader = self.downloader();
        downloader
            .fetch_audio(url, |event| {
                let _ = self.progress_tx.try_send(PipelineStage::Fetching(event));
            })
            .await
            .map_err(|e| {
                let _ = self.progress_tx.try_send(PipelineStage::Failed {
                    stage: "download".to_string(),
                    error: e.to_string(),
                });
                e
            })?;

        // 2. Render the square cover from the thumbnail
        let _ = self.progress_tx.send(PipelineStage::RenderingCover).await;

        let renderer = CoverRenderer::new(self.config.ffmpeg.clone(), self.config.cover_size);
        let cover = renderer.render(&workdir).await.map_err(|e| {
            let _ = self.progress_tx.try_send(PipelineStage::Failed {
                stage: "cover".to_string(),
                error: e.to_string(),
            });
            e
        })?;

        // 3. Derive tags from the sidecar
        let sidecar = Sidecar::read(&workdir.sidecar_file()).map_err(|e| {
            let _ = self.progress_tx.try_send(PipelineStage::Failed {
                stage: "sidecar".to_string(),
                error: e.to_string(),
            });
            StreamlineError::Io(e)
        })?;
        let tags = TrackTags::derive(&sidecar);

        // 4. Embed text frames, then the cover picture
        let _ = self
            .progress_tx
            .send(PipelineStage::WritingTags {
                artist: tags.artist.clone(),
                title: tags.title.clone(),
            })
            .await;

        let audio = workdir.audio_file();
        tagger::write_text_frames(&audio, &tags)
            .and_then(|_| tagger::attach_cover(&audio, &cover))
            .map_err(|e| {
                let _ = self.progress_tx.try_send(PipelineStage::Failed {
                    stage: "tags".to_string(),
                    error: e.to_string(),
                });
                e
            })?;

        // 5. Move into the output directory under the final name
        let _ = self.progress_tx.send(PipelineStage::Saving).await;

        let output = tagger::finalize(&audio, &self.config.output_dir, &tags).map_err(|e| {
            let _ = self.progress_tx.try_send(PipelineStage::Failed {
                stage: "save".to_string(),
                error: e.to_string(),
            });
            e
        })?;

        let duration = start_time.elapsed();
        info!(
            "Music job complete: {} ({:.1}s)",
            output.display(),
            duration.as_secs_f32()
        );

        let _ = self
            .progress_tx
            .send(PipelineStage::Complete {
                output: Some(output.clone()),
                duration,
            })
            .await;

        Ok(output)
    }

    /// Video flow, step one: print yt-dlp's format table for the URL.
    pub async fn list_formats(&self, url: &str) -> Result<(), StreamlineError> {
        Ok(self.downloader().list_formats(url).await?)
    }

    /// Video flow, step two: download the selected format, then scrub the
    /// audio staging artifacts. The product stays in the staging directory
    /// under the `video_downloaded` stem; no cover or tagging stages run.
    pub async fn run_video(&self, url: &str, format_code: &str) -> Result<(), StreamlineError> {
        let start_time = Instant::now();
        let workdir = self.workdir();

        info!("Starting video job for: {} (format {})", url, format_code);
        debug!("Staging directory: {}", workdir.root().display());

        // 1. Download the selected format
        self.downloader()
            .fetch_video(url, format_code, |event| {
                let _ = self.progress_tx.try_send(PipelineStage::Fetching(event));
            })
            .await
            .map_err(|e| {
                let _ = self.progress_tx.try_send(PipelineStage::Failed {
                    stage: "download".to_string(),
                    error: e.to_string(),
                });
                e
            })?;

        // 2. Scrub leftover audio artifacts
        let _ = self.progress_tx.send(PipelineStage::Cleaning).await;

        workdir.clean().map_err(|e| {
            let _ = self.progress_tx.try_send(PipelineStage::Failed {
                stage: "cleanup".to_string(),
                error: e.to_string(),
            });
            StreamlineError::Io(e)
        })?;

        let duration = start_time.elapsed();
        info!("Video job complete ({:.1}s)", duration.as_secs_f32());

        let _ = self
            .progress_tx
            .send(PipelineStage::Complete {
                output: None,
                duration,
            })
            .await;

        Ok(())
    }

    fn workdir(&self) -> Workdir {
        Workdir::new(self.config.staging_dir.clone())
    }

    fn downloader(&self) -> Downloader {
        Downloader::new(self.config.yt_dlp.clone(), self.workdir())
    }
}
