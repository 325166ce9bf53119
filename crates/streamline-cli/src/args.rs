use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "streamline")]
#[command(author, version, about = "YouTube audio/video fetcher with cover-art tagging")]
#[command(propagate_version = true)]
#[command(group(ArgGroup::new("mode").args(["music", "video"])))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// URL to fetch
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Music mode: extract an mp3, embed tags and cover art
    #[arg(short, long)]
    pub music: bool,

    /// Video mode: list formats, then download the code you pick
    #[arg(short, long)]
    pub video: bool,

    /// Output directory for the finished audio file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Staging directory for in-flight files (default: current dir)
    #[arg(long)]
    pub staging: Option<PathBuf>,

    /// Verbose output (--verbose, --verbose --verbose)
    #[arg(long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check external dependencies (yt-dlp, ffmpeg)
    Doctor,

    /// Show configuration
    Config,

    /// Remove leftover staging files
    Clean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Music,
    Video,
}

impl Cli {
    pub fn mode(&self) -> Option<Mode> {
        if self.music {
            Some(Mode::Music)
        } else if self.video {
            Some(Mode::Video)
        } else {
            None
        }
    }
}
