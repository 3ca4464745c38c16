use crate::downloader::ProgressEvent;
use crate::extractor::options::DownloadOptions;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Core trait for the external extraction tool
///
/// The runner only knows this trait, so batches can be driven by yt-dlp or
/// by a scripted stand-in in tests.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Download one URL, calling `on_progress` for every progress report.
    ///
    /// Returns the path of the final file when the tool reports it.
    async fn download(
        &self,
        url: &str,
        options: &DownloadOptions,
        on_progress: &(dyn Fn(ProgressEvent) + Send + Sync),
    ) -> Result<Option<PathBuf>>;
}
