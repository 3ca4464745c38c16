//! yt-dlp wrapper for downloading
//!
//! Runs the yt-dlp executable once per URL and turns its console output into
//! progress events. Both bundled and system-installed yt-dlp are supported.

use crate::downloader::ProgressEvent;
use crate::extractor::options::{DownloadOptions, PostProcessor};
use crate::extractor::traits::Extractor;
use crate::utils::error::SocialloaderError;
use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Prefix of the JSON progress lines requested with `--progress-template`
const PROGRESS_MARKER: &str = "socialloader:progress ";

/// Prefix of the final file path printed with `--print after_move:`
const FILE_MARKER: &str = "socialloader:file ";

/// Post-processor tags that mean ffmpeg is working on the file
const POSTPROCESS_TAGS: [&str; 6] = [
    "[ExtractAudio]",
    "[Merger]",
    "[VideoRemuxer]",
    "[VideoConvertor]",
    "[FixupM3u8]",
    "[FixupM4a]",
];

#[cfg(windows)]
const YTDLP_BIN: &str = "yt-dlp.exe";
#[cfg(not(windows))]
const YTDLP_BIN: &str = "yt-dlp";

/// Downloader backed by the yt-dlp executable
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    ///
    /// Search order:
    /// 1. Next to our own executable (bundled builds)
    /// 2. System PATH
    /// 3. Common installation paths (Homebrew, pip --user, etc.)
    pub fn new() -> Result<Self> {
        let ytdlp_path = match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                path
            }
            None => {
                error!("yt-dlp not found anywhere!");
                return Err(SocialloaderError::YtDlpNotFound.into());
            }
        };

        Ok(Self { ytdlp_path })
    }

    /// Use a specific yt-dlp executable
    pub fn with_path(ytdlp_path: impl Into<PathBuf>) -> Self {
        Self {
            ytdlp_path: ytdlp_path.into(),
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        on_progress: &(dyn Fn(ProgressEvent) + Send + Sync),
    ) -> Result<Option<PathBuf>> {
        let args = build_args(options, url);
        debug!("Running {} {:?}", self.ytdlp_path.display(), args);

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child.stdout.take().ok_or_else(|| {
            SocialloaderError::DownloadError("Failed to capture yt-dlp stdout".to_string())
        })?;
        let stderr = child.stderr.take().ok_or_else(|| {
            SocialloaderError::DownloadError("Failed to capture yt-dlp stderr".to_string())
        })?;

        // Depending on version and flags yt-dlp prints progress on either stream
        let (out, err) = tokio::join!(
            read_output(stdout, on_progress),
            read_output(stderr, on_progress)
        );
        let status = child.wait().await?;
        let (out, err) = (out?, err?);

        if !status.success() {
            let message = err
                .last_error
                .or(out.last_error)
                .unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            warn!("yt-dlp failed for {}: {}", url, message);
            return Err(SocialloaderError::DownloadError(message).into());
        }

        Ok(out.output_file.or(err.output_file))
    }
}

/// What was learned from one output stream
#[derive(Debug, Default)]
struct StreamSummary {
    last_error: Option<String>,
    output_file: Option<PathBuf>,
}

async fn read_output<R>(
    stream: R,
    on_progress: &(dyn Fn(ProgressEvent) + Send + Sync),
) -> std::io::Result<StreamSummary>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buffer = Vec::new();
    let mut summary = StreamSummary::default();

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer).await? == 0 {
            break;
        }
        // Titles are not always valid UTF-8 on every platform
        let line = String::from_utf8_lossy(&buffer);

        match parse_output_line(&line) {
            OutputLine::Progress(event) => on_progress(event),
            OutputLine::PostProcessing => on_progress(ProgressEvent::finished()),
            OutputLine::OutputFile(path) => summary.output_file = Some(path),
            OutputLine::Error(message) => summary.last_error = Some(message),
            OutputLine::Other => {}
        }
    }

    Ok(summary)
}

/// A classified line of yt-dlp console output
#[derive(Debug, Clone, PartialEq)]
pub enum OutputLine {
    Progress(ProgressEvent),
    PostProcessing,
    OutputFile(PathBuf),
    Error(String),
    Other,
}

/// Classify one line printed by yt-dlp
pub fn parse_output_line(line: &str) -> OutputLine {
    let line = line.trim_end_matches(&['\r', '\n'][..]);

    if let Some(json) = line.strip_prefix(PROGRESS_MARKER) {
        return match serde_json::from_str::<ProgressEvent>(json) {
            Ok(event) => OutputLine::Progress(event),
            Err(e) => {
                warn!("Failed to parse progress line: {}. Error: {}", json, e);
                OutputLine::Other
            }
        };
    }

    if let Some(path) = line.strip_prefix(FILE_MARKER) {
        let path = path.trim();
        return if path.is_empty() || path == "NA" {
            OutputLine::Other
        } else {
            OutputLine::OutputFile(PathBuf::from(path))
        };
    }

    if let Some(message) = line.strip_prefix("ERROR:") {
        return OutputLine::Error(message.trim().to_string());
    }

    if POSTPROCESS_TAGS.iter().any(|tag| line.starts_with(tag)) {
        return OutputLine::PostProcessing;
    }

    OutputLine::Other
}

/// Translate an option set into yt-dlp command-line arguments
pub fn build_args(options: &DownloadOptions, url: &str) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "--newline".into(),
        "--progress".into(),
        "--no-warnings".into(),
        "--progress-template".into(),
        format!("download:{}%(progress)j", PROGRESS_MARKER),
        "--print".into(),
        format!("after_move:{}%(filepath)s", FILE_MARKER),
        "-f".into(),
        options.format.clone(),
        "-o".into(),
        options.outtmpl.clone(),
    ];

    if options.noplaylist {
        args.push("--no-playlist".into());
    }

    for pp in &options.postprocessors {
        match pp {
            PostProcessor::StripFromTitle { pattern } => {
                args.push("--replace-in-metadata".into());
                args.push("title".into());
                args.push(pattern.clone());
                args.push(String::new());
            }
            PostProcessor::ExtractAudio {
                codec,
                bitrate_kbps,
            } => {
                args.push("--extract-audio".into());
                args.push("--audio-format".into());
                args.push(codec.clone());
                args.push("--audio-quality".into());
                args.push(format!("{}K", bitrate_kbps));
            }
        }
    }

    if let Some(container) = &options.merge_output_format {
        args.push("--merge-output-format".into());
        args.push(container.clone());
    }

    if options.write_subtitles == Some(false) {
        args.push("--no-write-subs".into());
        args.push("--no-write-auto-subs".into());
    }

    // Everything after `--` is a URL, even if it starts with a dash
    args.push("--".into());
    args.push(url.to_string());
    args
}

// ============================================================
// Tool Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Bundled (next to the executable)
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(bundled) = find_bundled_ytdlp() {
        info!("✓ Using bundled yt-dlp: {:?}", bundled);
        return Some(bundled);
    }

    if let Ok(system) = which::which(YTDLP_BIN) {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

/// Find ffmpeg on PATH; yt-dlp needs it for merging and audio extraction
pub fn find_ffmpeg() -> Option<PathBuf> {
    match which::which("ffmpeg") {
        Ok(path) => {
            info!("✓ Using ffmpeg: {:?}", path);
            Some(path)
        }
        Err(_) => {
            warn!("✗ ffmpeg not found on PATH; merging and audio conversion will fail");
            None
        }
    }
}

/// Find yt-dlp shipped next to our executable
fn find_bundled_ytdlp() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let exe_dir = exe_path.parent()?;

    // macOS bundle: App.app/Contents/MacOS/<bin> + Contents/Resources/bin/yt-dlp
    if exe_dir.ends_with("MacOS") {
        let resources = exe_dir.parent()?.join("Resources").join("bin").join(YTDLP_BIN);
        if is_executable(&resources) {
            return Some(resources);
        }
    }

    let dev_path = exe_dir.join(YTDLP_BIN);
    if is_executable(&dev_path) {
        return Some(dev_path);
    }

    None
}

/// Find yt-dlp in common installation paths
fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel)
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // pip --user
        "~/.local/bin/yt-dlp",
    ];

    common_paths
        .iter()
        .map(|path_str| match path_str.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(path_str)),
            None => PathBuf::from(path_str),
        })
        .find(|path| is_executable(path))
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.is_file()
    }
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{DownloadRequest, OutputKind, Quality};
    use crate::downloader::ProgressState;
    use crate::utils::AppSettings;

    fn options(kind: OutputKind, url: &str) -> DownloadOptions {
        let request = DownloadRequest {
            url: url.to_string(),
            output_kind: kind,
            quality: Quality::Height(720),
            destination_directory: PathBuf::from("/tmp/out"),
        };
        DownloadOptions::for_request(&request, &AppSettings::default())
    }

    #[test]
    fn test_parse_progress_line() {
        let line = format!(
            "{}{{\"status\": \"downloading\", \"downloaded_bytes\": 10, \"total_bytes\": 40}}\n",
            PROGRESS_MARKER
        );
        match parse_output_line(&line) {
            OutputLine::Progress(event) => {
                assert_eq!(event.status, ProgressState::Downloading);
                assert_eq!(event.fraction(), Some(0.25));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_broken_progress_line() {
        let line = format!("{}{{not json", PROGRESS_MARKER);
        assert_eq!(parse_output_line(&line), OutputLine::Other);
    }

    #[test]
    fn test_parse_file_line() {
        let line = format!("{}/tmp/out/My Clip.mp4\r\n", FILE_MARKER);
        assert_eq!(
            parse_output_line(&line),
            OutputLine::OutputFile(PathBuf::from("/tmp/out/My Clip.mp4"))
        );
    }

    #[test]
    fn test_parse_error_line() {
        assert_eq!(
            parse_output_line("ERROR: [generic] Unsupported URL: https://a/x"),
            OutputLine::Error("[generic] Unsupported URL: https://a/x".to_string())
        );
    }

    #[test]
    fn test_parse_postprocessing_lines() {
        assert_eq!(
            parse_output_line("[ExtractAudio] Destination: /tmp/out/a.mp3"),
            OutputLine::PostProcessing
        );
        assert_eq!(
            parse_output_line("[Merger] Merging formats into \"/tmp/out/a.mp4\""),
            OutputLine::PostProcessing
        );
        assert_eq!(
            parse_output_line("[youtube] abc123: Downloading webpage"),
            OutputLine::Other
        );
    }

    #[test]
    fn test_args_video() {
        let args = build_args(&options(OutputKind::Video, "https://a/x"), "https://a/x");

        let f = args.iter().position(|a| a == "-f").unwrap();
        assert!(args[f + 1].contains("height<=720"));
        assert!(args.contains(&"--no-playlist".to_string()));
        let m = args.iter().position(|a| a == "--merge-output-format").unwrap();
        assert_eq!(args[m + 1], "mp4");
        assert!(!args.contains(&"--extract-audio".to_string()));
        assert_eq!(args[args.len() - 2], "--");
        assert_eq!(args[args.len() - 1], "https://a/x");
    }

    #[test]
    fn test_args_audio() {
        let args = build_args(&options(OutputKind::Audio, "https://a/x"), "https://a/x");

        let f = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[f + 1], "bestaudio/best");
        let a = args.iter().position(|a| a == "--audio-format").unwrap();
        assert_eq!(args[a + 1], "mp3");
        let q = args.iter().position(|a| a == "--audio-quality").unwrap();
        assert_eq!(args[q + 1], "192K");
        assert!(!args.contains(&"--merge-output-format".to_string()));
    }

    #[test]
    fn test_args_strip_title_and_subtitles() {
        let url = "https://www.instagram.com/p/xyz123/";
        let args = build_args(&options(OutputKind::Video, url), url);

        let r = args.iter().position(|a| a == "--replace-in-metadata").unwrap();
        assert_eq!(args[r + 1], "title");
        assert_eq!(args[r + 3], "");
        assert!(args.contains(&"--no-write-subs".to_string()));
        assert!(args.contains(&"--no-write-auto-subs".to_string()));
    }

    #[test]
    fn test_find_ytdlp() {
        let result = find_ytdlp();
        println!("yt-dlp found at: {:?}", result);
        // Don't assert - yt-dlp might not be installed in CI
    }

    #[test]
    fn test_is_executable() {
        let path = PathBuf::from("/bin/sh");
        if cfg!(unix) && path.exists() {
            assert!(is_executable(&path));
        }
        assert!(!is_executable(Path::new("/definitely/not/here")));
    }
}
