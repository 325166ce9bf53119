pub mod clean;
pub mod config;
pub mod doctor;
pub mod music;
pub mod video;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::args::Cli;
use streamline_core::config::Config;
use streamline_core::pipeline::PipelineStage;
use streamline_core::progress::DownloadEvent;

/// Load configuration and fold in the command-line overrides.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(ref output) = cli.output {
        config.output.directory = output.clone();
    }
    if let Some(ref staging) = cli.staging {
        config.staging.directory = Some(staging.clone());
    }
    debug!("Output directory: {}", config.output.directory.display());
    Ok(config)
}

/// Render pipeline stages onto a progress bar until the channel closes.
///
/// The download occupies the first 80% of the bar; the local stages share
/// the rest.
pub(crate) fn spawn_progress_renderer(mut rx: mpsc::Receiver<PipelineStage>) -> JoinHandle<()> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} [{elapsed_precise}] {bar:40.cyan/blue} {msg}",
        )
        .unwrap()
        .progress_chars("=>-"),
    );

    tokio::spawn(async move {
        while let Some(stage) = rx.recv().await {
            match stage {
                PipelineStage::Fetching(event) => match event {
                    DownloadEvent::Progress {
                        percent,
                        total_bytes,
                    } => {
                        pb.set_position((percent * 0.8) as u64);
                        match total_bytes {
                            Some(total) => pb.set_message(format!(
                                "Downloading ({:.2} MiB)...",
                                total as f64 / (1024.0 * 1024.0)
                            )),
                            None => pb.set_message("Downloading..."),
                        }
                    }
                    DownloadEvent::Destination { file } => {
                        pb.set_message(format!("Downloading: {}", truncate(&file, 40)));
                    }
                    DownloadEvent::AlreadyDownloaded => {
                        pb.set_message("Already downloaded, reusing file");
                    }
                    DownloadEvent::Merging => {
                        pb.set_message("Merging streams...");
                    }
                },
                PipelineStage::RenderingCover => {
                    pb.set_position(85);
                    pb.set_message("Rendering cover...");
                }
                PipelineStage::WritingTags { artist, title } => {
                    pb.set_position(92);
                    pb.set_message(format!(
                        "Tagging: {}",
                        truncate(&format!("{} - {}", artist, title), 40)
                    ));
                }
                PipelineStage::Saving => {
                    pb.set_position(97);
                    pb.set_message("Saving...");
                }
                PipelineStage::Cleaning => {
                    pb.set_position(95);
                    pb.set_message("Cleaning staging files...");
                }
                PipelineStage::Complete { output, duration } => {
                    pb.set_position(100);
                    match output {
                        Some(path) => pb.finish_with_message(format!(
                            "Done: {} ({:.1}s)",
                            path.display(),
                            duration.as_secs_f32()
                        )),
                        None => pb.finish_with_message(format!(
                            "Done ({:.1}s)",
                            duration.as_secs_f32()
                        )),
                    }
                }
                PipelineStage::Failed { stage, error } => {
                    pb.abandon_with_message(format!("Failed at {}: {}", stage, error));
                }
            }
        }
    })
}

// Char-based so multibyte titles cannot split a code point
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
