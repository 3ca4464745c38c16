//! Application configuration

use crate::utils::bundle_paths::get_downloads_dir;
use std::path::PathBuf;
use std::time::Duration;

/// Prompt text the URL editor starts with; never treated as a URL
pub const URL_PLACEHOLDER: &str = "Paste URLs here (one per line)...";

/// Application settings
///
/// Built-in defaults only; nothing is read from or written to disk.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Initial destination directory
    pub download_location: PathBuf,

    /// Placeholder line shown in the URL editor
    pub placeholder: String,

    /// Codec used when extracting audio
    pub audio_codec: String,

    /// Target audio bitrate in kbps
    pub audio_bitrate_kbps: u32,

    /// Container video downloads are merged into
    pub video_container: String,

    /// Maximum number of title characters used in file names
    pub title_max_len: usize,

    /// How often the GUI drains worker events
    pub poll_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_location: get_downloads_dir(),
            placeholder: URL_PLACEHOLDER.to_string(),
            audio_codec: "mp3".to_string(),
            audio_bitrate_kbps: 192,
            video_container: "mp4".to_string(),
            title_max_len: 180,
            poll_interval: Duration::from_millis(100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppSettings::default();
        assert_eq!(config.audio_codec, "mp3");
        assert_eq!(config.audio_bitrate_kbps, 192);
        assert_eq!(config.video_container, "mp4");
        assert!(config.title_max_len > 0);
        assert!(config.poll_interval > Duration::ZERO);
    }

    #[test]
    fn test_default_location_is_absolute() {
        let config = AppSettings::default();
        assert!(config.download_location.is_absolute());
    }
}
