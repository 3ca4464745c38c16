//! Data structures for a single download request

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What the user wants to end up with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputKind {
    #[default]
    Video,
    Audio,
}

impl OutputKind {
    /// Label shown next to the radio button
    pub fn label(&self) -> &'static str {
        match self {
            OutputKind::Video => "Video (MP4)",
            OutputKind::Audio => "Audio (MP3)",
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, OutputKind::Audio)
    }
}

/// Requested video quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quality {
    #[default]
    Best,
    /// Maximum video height in pixels
    Height(u32),
}

impl Quality {
    /// Options offered by the quality selector, best first
    pub const ALL: [Quality; 7] = [
        Quality::Best,
        Quality::Height(1080),
        Quality::Height(720),
        Quality::Height(480),
        Quality::Height(360),
        Quality::Height(240),
        Quality::Height(144),
    ];

    pub fn max_height(&self) -> Option<u32> {
        match self {
            Quality::Best => None,
            Quality::Height(h) => Some(*h),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Best => write!(f, "best"),
            Quality::Height(h) => write!(f, "{}p", h),
        }
    }
}

impl FromStr for Quality {
    type Err = String;

    /// Accepts `best`, `720` or `720p`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.eq_ignore_ascii_case("best") {
            return Ok(Quality::Best);
        }

        let digits = token.strip_suffix('p').unwrap_or(token);
        match digits.parse::<u32>() {
            Ok(h) if h > 0 => Ok(Quality::Height(h)),
            _ => Err(format!("Unknown quality: {}", s)),
        }
    }
}

/// One URL to hand to the extractor, with the options chosen for the batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub url: String,
    pub output_kind: OutputKind,
    pub quality: Quality,
    pub destination_directory: PathBuf,
}
