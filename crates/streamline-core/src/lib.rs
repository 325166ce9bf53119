//! streamline-core: Download, cover, and tagging pipeline for streamline

pub mod config;
pub mod downloader;
pub mod error;
pub mod pipeline;
pub mod progress;
pub mod sidecar;
pub mod tagger;
pub mod thumbnail;
pub mod workdir;

pub use config::Config;
pub use error::{Result, StreamlineError};
