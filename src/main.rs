//! Social Media Downloader
//!
//! Paste YouTube, Instagram or Facebook links and save them as MP4 video or
//! MP3 audio. yt-dlp does the downloading; ffmpeg does merging and conversion.

use anyhow::Result;
use socialloader::extractor::{find_ffmpeg, find_ytdlp};
use socialloader::utils::AppSettings;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    check_tools();

    socialloader::app::run(AppSettings::default())
}

/// Log where the external tools were found.
///
/// Missing tools do not stop the app; the window shows a warning instead.
fn check_tools() {
    match find_ytdlp() {
        Some(path) => info!("yt-dlp found at: {}", path.display()),
        None => {
            warn!("yt-dlp not found; downloads will fail");
            warn!("Install it with `pip install yt-dlp` or see https://github.com/yt-dlp/yt-dlp");
        }
    }

    match find_ffmpeg() {
        Some(path) => info!("ffmpeg found at: {}", path.display()),
        None => warn!("ffmpeg not found; merging and MP3 conversion will fail"),
    }
}
