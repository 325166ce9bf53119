//! Parsing of yt-dlp `--newline --progress` output

use regex::Regex;

/// One parsed line of yt-dlp progress output.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadEvent {
    /// Percent complete (0-100), with the total size in bytes when the line
    /// carried one.
    Progress {
        percent: f32,
        total_bytes: Option<u64>,
    },
    /// yt-dlp announced the file it is about to write.
    Destination { file: String },
    /// The output file already exists; yt-dlp skipped the download.
    AlreadyDownloaded,
    /// Separate audio/video streams are being merged (composite format
    /// codes like `137+140`).
    Merging,
}

/// Line parser for yt-dlp progress output. Compiled once per invocation and
/// fed every stdout line; lines it does not recognize yield `None`.
#[derive(Debug)]
pub struct ProgressParser {
    percent_with_size: Regex,
    percent_only: Regex,
    size: Regex,
}

impl ProgressParser {
    pub fn new() -> Self {
        // The patterns are fixed, so compilation cannot fail
        Self {
            percent_with_size: Regex::new(
                r"\[download\]\s+(\d+\.?\d*)%\s+of\s+~?\s*([\d.]+\s*[KMGT]i?B)",
            )
            .unwrap(),
            percent_only: Regex::new(r"\[download\]\s+(\d+\.?\d*)%").unwrap(),
            size: Regex::new(r"([\d.]+)\s*([KMGT]i?B?)").unwrap(),
        }
    }

    pub fn parse(&self, line: &str) -> Option<DownloadEvent> {
        if line.contains("Merging formats") {
            return Some(DownloadEvent::Merging);
        }
        if !line.contains("[download]") {
            return None;
        }
        if let Some(rest) = line.split("Destination:").nth(1) {
            return Some(DownloadEvent::Destination {
                file: rest.trim().to_string(),
            });
        }
        if line.contains("has already been downloaded") {
            return Some(DownloadEvent::AlreadyDownloaded);
        }
        if let Some(caps) = self.percent_with_size.captures(line) {
            let percent = caps[1].parse().ok()?;
            return Some(DownloadEvent::Progress {
                percent,
                total_bytes: self.parse_size(&caps[2]),
            });
        }
        if let Some(caps) = self.percent_only.captures(line) {
            let percent = caps[1].parse().ok()?;
            return Some(DownloadEvent::Progress {
                percent,
                total_bytes: None,
            });
        }
        None
    }

    /// Convert a human-readable size like `12.34MiB` or `1.2G` to bytes.
    /// yt-dlp prints binary units, so every prefix is a power of 1024.
    fn parse_size(&self, text: &str) -> Option<u64> {
        let caps = self.size.captures(text)?;
        let value: f64 = caps[1].parse().ok()?;
        let multiplier: f64 = match caps[2].chars().next()? {
            'B' => 1.0,
            'K' => 1024.0,
            'M' => 1024.0 * 1024.0,
            'G' => 1024.0 * 1024.0 * 1024.0,
            'T' => 1024.0 * 1024.0 * 1024.0 * 1024.0,
            _ => return None,
        };
        Some((value * multiplier) as u64)
    }
}

impl Default for ProgressParser {
    fn default() -> Self {
        Self::new()
    }
}
