//! Metadata sidecar parsing and tag derivation

use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Fallbacks applied when the sidecar leaves a field out.
pub const DEFAULT_TITLE: &str = "Unknown Title";
pub const DEFAULT_ARTIST: &str = "Unknown Artist";
pub const DEFAULT_ALBUM: &str = "YouTube Downloads";
pub const DEFAULT_TRACK: &str = "1";

/// The subset of yt-dlp's `.info.json` sidecar the tagger cares about.
///
/// Every field is optional: yt-dlp only fills the music fields (`track`,
/// `artist`, `album`) in when the source site exposes them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sidecar {
    #[serde(default, deserialize_with = "lenient")]
    pub track: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub uploader: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub album: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub track_number: Option<TrackNumber>,
}

/// Most extractors write the track number as a JSON number, a few as a
/// string. Both render to the same text frame.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TrackNumber {
    Number(i64),
    Text(String),
}

impl TrackNumber {
    fn as_text(&self) -> String {
        match self {
            TrackNumber::Number(n) => n.to_string(),
            TrackNumber::Text(s) => s.clone(),
        }
    }
}

/// Accept the field when it has the expected shape, treat it as absent when a
/// site writes something else. A single odd field must never abort the run.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl Sidecar {
    /// Read and parse the sidecar file.
    ///
    /// Unknown keys (the sidecar carries hundreds) are ignored; a file that
    /// is not JSON at all is an error.
    pub fn read(path: &Path) -> io::Result<Self> {
        debug!("Reading sidecar: {}", path.display());
        let raw = fs::read_to_string(path)?;
        serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// The four tag fields written into the audio file, derived from the sidecar
/// with the fallback chain:
///
/// - title:  `track`, then `title`, then "Unknown Title"
/// - artist: `artist`, then `uploader`, then "Unknown Artist"
/// - album:  `album`, then "YouTube Downloads"
/// - track:  `track_number` rendered as text, then "1"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub track: String,
}

impl TrackTags {
    pub fn derive(sidecar: &Sidecar) -> Self {
        let title = non_empty(&sidecar.track)
            .or_else(|| non_empty(&sidecar.title))
            .unwrap_or(DEFAULT_TITLE)
            .to_string();
        let artist = non_empty(&sidecar.artist)
            .or_else(|| non_empty(&sidecar.uploader))
            .unwrap_or(DEFAULT_ARTIST)
            .to_string();
        let album = non_empty(&sidecar.album)
            .unwrap_or(DEFAULT_ALBUM)
            .to_string();
        let track = sidecar
            .track_number
            .as_ref()
            .map(TrackNumber::as_text)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TRACK.to_string());

        Self {
            title,
            artist,
            album,
            track,
        }
    }
}

/// Missing and empty-string fields count the same.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidecar(json: &str) -> Sidecar {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn all_fields_missing_fall_back_to_defaults() {
        let tags = TrackTags::derive(&sidecar("{}"));
        assert_eq!(tags.title, "Unknown Title");
        assert_eq!(tags.artist, "Unknown Artist");
        assert_eq!(tags.album, "YouTube Downloads");
        assert_eq!(tags.track, "1");
    }

    #[test]
    fn track_and_artist_take_precedence() {
        let tags = TrackTags::derive(&sidecar(
            r#"{"track": "Song", "title": "Song (Official Video)", "artist": "Band", "uploader": "BandVEVO"}"#,
        ));
        assert_eq!(tags.title, "Song");
        assert_eq!(tags.artist, "Band");
        assert_eq!(tags.album, "YouTube Downloads");
    }

    #[test]
    fn title_and_uploader_are_fallbacks() {
        let tags = TrackTags::derive(&sidecar(
            r#"{"title": "Some Clip", "uploader": "Some Channel"}"#,
        ));
        assert_eq!(tags.title, "Some Clip");
        assert_eq!(tags.artist, "Some Channel");
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let tags = TrackTags::derive(&sidecar(
            r#"{"track": "", "title": "Fallback", "artist": "", "uploader": "Channel", "album": "  "}"#,
        ));
        assert_eq!(tags.title, "Fallback");
        assert_eq!(tags.artist, "Channel");
        assert_eq!(tags.album, "YouTube Downloads");
    }

    #[test]
    fn track_number_renders_as_text() {
        let tags = TrackTags::derive(&sidecar(r#"{"track_number": 7}"#));
        assert_eq!(tags.track, "7");

        let tags = TrackTags::derive(&sidecar(r#"{"track_number": "3"}"#));
        assert_eq!(tags.track, "3");

        let tags = TrackTags::derive(&sidecar(r#"{"track_number": 0}"#));
        assert_eq!(tags.track, "0");
    }

    #[test]
    fn wrong_typed_fields_are_tolerated() {
        let tags = TrackTags::derive(&sidecar(
            r#"{"track": 42, "artist": ["a", "b"], "track_number": {"n": 1}}"#,
        ));
        assert_eq!(tags.title, "Unknown Title");
        assert_eq!(tags.artist, "Unknown Artist");
        assert_eq!(tags.track, "1");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = r#"{
            "id": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "uploader": "Rick Astley",
            "duration": 213,
            "formats": [{"format_id": "251"}],
            "album": "Whenever You Need Somebody",
            "track_number": 1
        }"#;
        let tags = TrackTags::derive(&sidecar(raw));
        assert_eq!(tags.title, "Never Gonna Give You Up");
        assert_eq!(tags.artist, "Rick Astley");
        assert_eq!(tags.album, "Whenever You Need Somebody");
        assert_eq!(tags.track, "1");
    }

    #[test]
    fn read_rejects_non_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("downloaded.info.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(Sidecar::read(&path).is_err());
    }
}
