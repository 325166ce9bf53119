//! yt-dlp invocation for audio and video jobs

use crate::error::DownloadError;
use crate::progress::{DownloadEvent, ProgressParser};
use crate::workdir::Workdir;
use std::io;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info};

pub struct Downloader {
    yt_dlp_path: PathBuf,
    workdir: Workdir,
}

impl Downloader {
    pub fn new(yt_dlp_path: PathBuf, workdir: Workdir) -> Self {
        Self {
            yt_dlp_path,
            workdir,
        }
    }

    /// Download and extract audio, plus the metadata sidecar and thumbnail
    /// the later stages need.
    pub async fn fetch_audio(
        &self,
        url: &str,
        mut on_event: impl FnMut(DownloadEvent),
    ) -> Result<(), DownloadError> {
        info!("Downloading audio from: {}", url);
        self.run_streaming(self.audio_command(url), &mut on_event)
            .await
    }

    /// Print the available format table for the URL. Output goes straight to
    /// the terminal so the user can pick a format code from it.
    pub async fn list_formats(&self, url: &str) -> Result<(), DownloadError> {
        info!("Listing formats for: {}", url);

        let status = Command::new(&self.yt_dlp_path)
            .current_dir(self.workdir.root())
            .args(["-F", url])
            .status()
            .await?;

        if !status.success() {
            return Err(DownloadError::YtDlpFailed(status.code()));
        }
        Ok(())
    }

    /// Download the stream(s) selected by a format code from the `-F` table.
    pub async fn fetch_video(
        &self,
        url: &str,
        format_code: &str,
        mut on_event: impl FnMut(DownloadEvent),
    ) -> Result<(), DownloadError> {
        info!("Downloading video format {} from: {}", format_code, url);
        self.run_streaming(self.video_command(url, format_code), &mut on_event)
            .await
    }

    fn audio_command(&self, url: &str) -> Command {
        let template = self.workdir.audio_template();
        let mut cmd = Command::new(&self.yt_dlp_path);
        cmd.current_dir(self.workdir.root());
        cmd.args([
            // Extract an mp3 from the best available audio stream
            "-x",
            "--audio-format",
            "mp3",
            // Let yt-dlp embed what it can; the tagger rewrites the text
            // frames and cover afterwards
            "--embed-thumbnail",
            "--embed-metadata",
            "--add-metadata",
            // Sidecar and thumbnail for the cover and tagging stages
            "--write-info-json",
            "--write-thumbnail",
            "-o",
            template.as_str(),
            url,
        ]);
        cmd
    }

    fn video_command(&self, url: &str, format_code: &str) -> Command {
        let template = self.workdir.video_template();
        let mut cmd = Command::new(&self.yt_dlp_path);
        cmd.current_dir(self.workdir.root());
        cmd.args(["-f", format_code, "-o", template.as_str(), url]);
        cmd
    }

    /// Run yt-dlp with piped stdout, feeding each line through the progress
    /// parser. stderr stays on the terminal so the tool's own diagnostics
    /// reach the user.
    async fn run_streaming(
        &self,
        mut cmd: Command,
        on_event: &mut impl FnMut(DownloadEvent),
    ) -> Result<(), DownloadError> {
        cmd.args(["--newline", "--progress"]);
        cmd.stdout(Stdio::piped());

        let mut child = cmd.spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "stdout not captured"))?;

        let parser = ProgressParser::new();
        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines.next_line().await? {
            debug!("yt-dlp: {}", line);
            if let Some(event) = parser.parse(&line) {
                on_event(event);
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            return Err(DownloadError::YtDlpFailed(status.code()));
        }
        Ok(())
    }
}
