use std::path::PathBuf;

/// Events sent from the download worker to the GUI
///
/// Each event is a complete value; the GUI applies it in one `update` call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// yt-dlp is about to be started for the request at `ordinal` (1-based)
    RequestStarted {
        ordinal: usize,
        total: usize,
        url: String,
        fraction: f32,
        status: String,
    },

    /// Overall batch progress and the matching status line
    Progress { fraction: f32, status: String },

    RequestCompleted {
        ordinal: usize,
        total: usize,
        url: String,
        output_file: Option<PathBuf>,
    },

    /// One URL failed; the batch keeps going
    RequestFailed {
        ordinal: usize,
        total: usize,
        url: String,
        error: String,
    },

    /// Failure outside any single request
    UnexpectedError(String),

    /// Always the last event of a batch
    BatchFinished(BatchSummary),
}

/// Outcome counts for a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
}

impl BatchSummary {
    /// Requests that never ran because the batch was cancelled
    pub fn skipped(&self) -> usize {
        self.total.saturating_sub(self.succeeded + self.failed)
    }
}

/// Text of the per-URL error dialog
pub fn failure_description(ordinal: usize, total: usize, url: &str, error: &str) -> String {
    format!(
        "Failed to download {}/{}\n{}\n\nError: {}",
        ordinal, total, url, error
    )
}
