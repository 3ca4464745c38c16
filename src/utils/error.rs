//! Error handling for Socialloader

use std::path::PathBuf;
use thiserror::Error;

/// Input problems caught before a batch is started
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least one URL")]
    NoUrls,

    #[error("Output directory does not exist: {}", .0.display())]
    BadDirectory(PathBuf),
}

/// Main error type for Socialloader
#[derive(Debug, Error)]
pub enum SocialloaderError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Download cancelled")]
    Cancelled,

    #[error("Download worker failed: {0}")]
    WorkerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
