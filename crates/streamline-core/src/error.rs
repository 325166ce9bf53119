//! Error types for streamline-core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StreamlineError>;

#[derive(Error, Debug)]
pub enum StreamlineError {
    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Cover rendering failed: {0}")]
    Thumbnail(#[from] ThumbnailError),

    #[error("Tagging failed: {0}")]
    Tag(#[from] TagError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("yt-dlp failed with exit code: {0:?}")]
    YtDlpFailed(Option<i32>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ThumbnailError {
    #[error("No thumbnail found (tried jpg, webp, png)")]
    NotFound,

    #[error("FFmpeg failed with exit code: {0:?}")]
    FfmpegFailed(Option<i32>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum TagError {
    #[error("ID3 write failed: {0}")]
    Id3(#[from] id3::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadError(String),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
