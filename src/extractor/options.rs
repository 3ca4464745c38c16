//! yt-dlp option set for a single request

use crate::collector::{DownloadRequest, OutputKind, Quality};
use crate::utils::config::AppSettings;

/// Characters that are not allowed in file names on common filesystems
pub const ILLEGAL_FILENAME_CHARS: &str = r#"[<>:"/\\|?*]"#;

/// Hosts whose extractors should not try to fetch subtitles
const NO_SUBTITLE_HOSTS: [&str; 3] = ["instagram.com", "facebook.com", "fb.watch"];

/// Transformation applied by yt-dlp after (or around) the fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostProcessor {
    /// Remove every regex match from the title before the file name is rendered
    StripFromTitle { pattern: String },
    /// Convert the downloaded stream to an audio file
    ExtractAudio { codec: String, bitrate_kbps: u32 },
}

/// Everything the extractor needs to know about one download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Format selector expression
    pub format: String,
    /// Output file name template
    pub outtmpl: String,
    pub postprocessors: Vec<PostProcessor>,
    pub noplaylist: bool,
    /// Container merged/remuxed video is written to
    pub merge_output_format: Option<String>,
    /// `Some(false)` explicitly turns subtitle writing off
    pub write_subtitles: Option<bool>,
}

impl DownloadOptions {
    /// Build the option set for a request
    pub fn for_request(request: &DownloadRequest, settings: &AppSettings) -> Self {
        let mut postprocessors = vec![PostProcessor::StripFromTitle {
            pattern: ILLEGAL_FILENAME_CHARS.to_string(),
        }];

        let merge_output_format = match request.output_kind {
            OutputKind::Audio => {
                postprocessors.push(PostProcessor::ExtractAudio {
                    codec: settings.audio_codec.clone(),
                    bitrate_kbps: settings.audio_bitrate_kbps,
                });
                None
            }
            OutputKind::Video => Some(settings.video_container.clone()),
        };

        let outtmpl = request
            .destination_directory
            .join(format!("%(title).{}s.%(ext)s", settings.title_max_len))
            .to_string_lossy()
            .to_string();

        Self {
            format: format_selector(request.output_kind, request.quality, &settings.video_container),
            outtmpl,
            postprocessors,
            noplaylist: true,
            merge_output_format,
            write_subtitles: disables_subtitles(&request.url).then_some(false),
        }
    }
}

/// Format selector for the chosen output kind and quality.
///
/// Audio ignores the quality. Video prefers separate streams in `container`
/// merged together, then a single file, and always ends in plain `best`.
pub fn format_selector(kind: OutputKind, quality: Quality, container: &str) -> String {
    match (kind, quality.max_height()) {
        (OutputKind::Audio, _) => "bestaudio/best".to_string(),
        (OutputKind::Video, None) => format!(
            "bestvideo[ext={c}]+bestaudio[ext=m4a]/best[ext={c}]/best",
            c = container
        ),
        (OutputKind::Video, Some(h)) => format!(
            "bestvideo[height<={h}][ext={c}]+bestaudio[ext=m4a]/\
             best[height<={h}][ext={c}]/best[height<={h}]/best",
            h = h,
            c = container
        ),
    }
}

/// Instagram and Facebook extractors choke on subtitle requests
pub fn disables_subtitles(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    NO_SUBTITLE_HOSTS.iter().any(|host| url.contains(host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request(kind: OutputKind, quality: Quality, url: &str) -> DownloadRequest {
        DownloadRequest {
            url: url.to_string(),
            output_kind: kind,
            quality,
            destination_directory: PathBuf::from("/tmp/out"),
        }
    }

    #[test]
    fn test_audio_ignores_quality() {
        let settings = AppSettings::default();
        for quality in Quality::ALL {
            let opts = DownloadOptions::for_request(
                &request(OutputKind::Audio, quality, "https://a/x"),
                &settings,
            );
            assert_eq!(opts.format, "bestaudio/best");
            assert!(opts.postprocessors.contains(&PostProcessor::ExtractAudio {
                codec: "mp3".to_string(),
                bitrate_kbps: 192,
            }));
            assert_eq!(opts.merge_output_format, None);
        }
    }

    #[test]
    fn test_video_height_cap() {
        let selector = format_selector(OutputKind::Video, Quality::Height(720), "mp4");
        assert!(selector.contains("[height<=720]"));
        assert!(selector.ends_with("/best"));
        assert!(!selector.contains("1080"));
    }

    #[test]
    fn test_video_best_is_unconstrained() {
        let selector = format_selector(OutputKind::Video, Quality::Best, "mp4");
        assert!(!selector.contains("height"));
        assert!(selector.starts_with("bestvideo[ext=mp4]+bestaudio"));
        assert!(selector.ends_with("/best"));
    }

    #[test]
    fn test_video_merges_into_container() {
        let opts = DownloadOptions::for_request(
            &request(OutputKind::Video, Quality::Height(480), "https://a/x"),
            &AppSettings::default(),
        );
        assert_eq!(opts.merge_output_format.as_deref(), Some("mp4"));
        assert!(opts.noplaylist);
        assert!(!opts
            .postprocessors
            .iter()
            .any(|p| matches!(p, PostProcessor::ExtractAudio { .. })));
    }

    #[test]
    fn test_output_template() {
        let opts = DownloadOptions::for_request(
            &request(OutputKind::Video, Quality::Best, "https://a/x"),
            &AppSettings::default(),
        );
        let expected = PathBuf::from("/tmp/out").join("%(title).180s.%(ext)s");
        assert_eq!(PathBuf::from(&opts.outtmpl), expected);
        assert_eq!(
            opts.postprocessors[0],
            PostProcessor::StripFromTitle {
                pattern: ILLEGAL_FILENAME_CHARS.to_string()
            }
        );
    }

    #[test]
    fn test_subtitles_disabled_for_social_hosts() {
        assert!(disables_subtitles("https://www.instagram.com/p/xyz123/"));
        assert!(disables_subtitles("https://www.Facebook.com/watch/?v=1"));
        assert!(disables_subtitles("https://fb.watch/abc"));
        assert!(!disables_subtitles("https://www.youtube.com/watch?v=abc123"));

        let opts = DownloadOptions::for_request(
            &request(OutputKind::Video, Quality::Best, "https://fb.watch/abc"),
            &AppSettings::default(),
        );
        assert_eq!(opts.write_subtitles, Some(false));
    }
}
