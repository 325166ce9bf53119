//! Configuration management for streamline

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub staging: StagingConfig,
    pub cover: CoverConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Path to yt-dlp binary (auto-detected if not set)
    pub yt_dlp: Option<PathBuf>,
    /// Path to FFmpeg binary (auto-detected if not set)
    pub ffmpeg: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the finished audio file is moved into
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Directory for in-flight download artifacts (current dir if not set)
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverConfig {
    /// Side length of the square cover image in pixels
    pub size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                yt_dlp: None,
                ffmpeg: None,
            },
            output: OutputConfig {
                directory: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            },
            staging: StagingConfig { directory: None },
            cover: CoverConfig { size: 500 },
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Config::default()));

        // Load from default config directory
        if let Some(config_dir) = dirs::config_dir() {
            let default_config = config_dir.join("streamline/config.toml");
            if default_config.exists() {
                figment = figment.merge(Toml::file(&default_config));
            }
        }

        // Load from specified config file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment
        figment = figment.merge(Env::prefixed("STREAMLINE_").split("_"));

        figment.extract().map_err(|e| ConfigError::LoadError(e.to_string()))
    }

    /// Get yt-dlp path, auto-detecting if not configured
    pub fn yt_dlp_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.yt_dlp {
            Ok(path.clone())
        } else {
            which::which("yt-dlp")
                .map_err(|_| ConfigError::InvalidValue("yt-dlp not found in PATH".to_string()))
        }
    }

    /// Get FFmpeg path, auto-detecting if not configured
    pub fn ffmpeg_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(ref path) = self.paths.ffmpeg {
            Ok(path.clone())
        } else {
            which::which("ffmpeg")
                .map_err(|_| ConfigError::InvalidValue("ffmpeg not found in PATH".to_string()))
        }
    }

    /// Get staging directory, defaulting to the current working directory
    pub fn staging_dir(&self) -> Result<PathBuf, ConfigError> {
        match self.staging.directory {
            Some(ref dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(ConfigError::Io),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.cover.size, 500);
        assert!(config.paths.yt_dlp.is_none());
        assert!(config.paths.ffmpeg.is_none());
        assert!(config.staging.directory.is_none());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[cover]\nsize = 320\n\n[staging]\ndirectory = \"/tmp/stage\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.cover.size, 320);
        assert_eq!(
            config.staging.directory.as_deref(),
            Some(Path::new("/tmp/stage"))
        );
        // Untouched sections keep their defaults
        assert!(config.paths.yt_dlp.is_none());
    }

    #[test]
    fn explicit_staging_dir_wins_over_cwd() {
        let mut config = Config::default();
        config.staging.directory = Some(PathBuf::from("/tmp/elsewhere"));
        assert_eq!(config.staging_dir().unwrap(), PathBuf::from("/tmp/elsewhere"));
    }
}
