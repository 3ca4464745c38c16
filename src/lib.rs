//! Socialloader library

pub mod app;
pub mod backend;
pub mod collector;
pub mod downloader;
pub mod extractor;
pub mod gui;
pub mod utils;

// Re-export main types for easier use
pub use backend::{spawn_batch, BackendEvent, BatchHandle, BatchSummary};
pub use collector::{collect, CollectOptions, DownloadRequest, OutputKind, Quality};
pub use downloader::{BatchProgress, ProgressEvent, ProgressState};
pub use extractor::{DownloadOptions, Extractor, YtDlpExtractor};
pub use gui::{Message, SocialloaderApp};
pub use utils::{AppSettings, SocialloaderError, ValidationError};
