//! ID3 embedding and final placement of the audio file

use crate::error::TagError;
use crate::sidecar::TrackTags;
use id3::frame::{Content, Picture, PictureType};
use id3::{Frame, Tag, TagLike, Version};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Write the four text frames derived from the sidecar, replacing whatever
/// yt-dlp embedded during extraction.
pub fn write_text_frames(audio: &Path, tags: &TrackTags) -> Result<(), TagError> {
    info!("Embedding tags: {} - {}", tags.artist, tags.title);

    let mut tag = read_or_new(audio);
    tag.set_title(tags.title.as_str());
    tag.set_artist(tags.artist.as_str());
    tag.set_album(tags.album.as_str());
    // Track stays a text frame; sidecars carry values like "3" or "3/12"
    tag.add_frame(Frame::text("TRCK", tags.track.as_str()));
    tag.write_to_path(audio, Version::Id3v24)?;
    Ok(())
}

/// Reopen the tag and attach the rendered cover as the front-cover picture.
/// An existing front cover is replaced.
pub fn attach_cover(audio: &Path, cover: &Path) -> Result<(), TagError> {
    let data = fs::read(cover)?;

    let mut tag = read_or_new(audio);
    tag.add_frame(Frame::with_content(
        "APIC",
        Content::Picture(Picture {
            mime_type: "image/jpeg".to_string(),
            picture_type: PictureType::CoverFront,
            description: "Cover".to_string(),
            data,
        }),
    ));
    tag.write_to_path(audio, Version::Id3v24)?;

    debug!("Attached cover from: {}", cover.display());
    Ok(())
}

/// Move the tagged file into the output directory as
/// `"<artist> - <title>.mp3"`. An existing file with that name is replaced.
pub fn finalize(audio: &Path, output_dir: &Path, tags: &TrackTags) -> Result<PathBuf, TagError> {
    fs::create_dir_all(output_dir)?;

    let destination = output_dir.join(destination_file_name(tags));
    fs::rename(audio, &destination)?;

    info!("Saved to: {}", destination.display());
    Ok(destination)
}

/// `"<artist> - <title>.mp3"` with both parts sanitized. The embedded tags
/// keep the raw values; only the file name is touched.
pub fn destination_file_name(tags: &TrackTags) -> String {
    format!(
        "{} - {}.mp3",
        sanitize_filename(&tags.artist),
        sanitize_filename(&tags.title)
    )
}

fn read_or_new(audio: &Path) -> Tag {
    match Tag::read_from_path(audio) {
        Ok(tag) => tag,
        Err(_) => Tag::new(),
    }
}

/// Sanitize filename for filesystem
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> TrackTags {
        TrackTags {
            title: "Song".to_string(),
            artist: "Band".to_string(),
            album: "YouTube Downloads".to_string(),
            track: "7".to_string(),
        }
    }

    #[test]
    fn sanitize_replaces_reserved_characters() {
        assert_eq!(sanitize_filename("AC/DC"), "AC_DC");
        assert_eq!(sanitize_filename("what? when: where"), "what_ when_ where");
        assert_eq!(sanitize_filename("  padded  "), "padded");
        assert_eq!(sanitize_filename("plain title"), "plain title");
    }

    #[test]
    fn destination_name_is_artist_dash_title() {
        assert_eq!(destination_file_name(&tags()), "Band - Song.mp3");
    }

    #[test]
    fn destination_name_is_sanitized() {
        let tags = TrackTags {
            title: "Back in Black?".to_string(),
            artist: "AC/DC".to_string(),
            album: "Back in Black".to_string(),
            track: "1".to_string(),
        };
        assert_eq!(destination_file_name(&tags), "AC_DC - Back in Black_.mp3");
    }

    #[test]
    fn text_frames_then_cover_survive_a_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("downloaded.mp3");
        fs::write(&audio, b"").unwrap();
        let cover = dir.path().join("cover.jpg");
        fs::write(&cover, b"\xff\xd8\xffjpeg-bytes").unwrap();

        write_text_frames(&audio, &tags()).unwrap();
        attach_cover(&audio, &cover).unwrap();

        let tag = Tag::read_from_path(&audio).unwrap();
        assert_eq!(tag.title(), Some("Song"));
        assert_eq!(tag.artist(), Some("Band"));
        assert_eq!(tag.album(), Some("YouTube Downloads"));
        assert_eq!(tag.track(), Some(7));

        let pictures: Vec<&Picture> = tag.pictures().collect();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].mime_type, "image/jpeg");
        assert_eq!(pictures[0].description, "Cover");
        assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
        assert_eq!(pictures[0].data, fs::read(&cover).unwrap());
    }

    #[test]
    fn finalize_moves_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("downloaded.mp3");
        fs::write(&audio, b"fresh").unwrap();

        let output_dir = dir.path().join("out");
        fs::create_dir_all(&output_dir).unwrap();
        fs::write(output_dir.join("Band - Song.mp3"), b"stale").unwrap();

        let destination = finalize(&audio, &output_dir, &tags()).unwrap();
        assert_eq!(destination, output_dir.join("Band - Song.mp3"));
        assert_eq!(fs::read(&destination).unwrap(), b"fresh");
        assert!(!audio.exists());
    }

    #[test]
    fn finalize_creates_missing_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("downloaded.mp3");
        fs::write(&audio, b"audio").unwrap();

        let output_dir = dir.path().join("nested").join("out");
        let destination = finalize(&audio, &output_dir, &tags()).unwrap();
        assert!(destination.exists());
    }
}
