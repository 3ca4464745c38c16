//! Progress tracking for downloads

use serde::{Deserialize, Deserializer};

/// Download state as reported by yt-dlp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressState {
    #[default]
    Downloading,
    Finished,
    #[serde(other)]
    Unknown,
}

/// One progress report for the request that is currently running.
///
/// Field names follow yt-dlp's progress dictionary so the JSON printed by
/// `--progress-template %(progress)j` deserializes directly.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProgressEvent {
    pub status: ProgressState,
    #[serde(default, deserialize_with = "byte_count")]
    pub downloaded_bytes: Option<u64>,
    #[serde(default, deserialize_with = "byte_count")]
    pub total_bytes: Option<u64>,
    #[serde(default, deserialize_with = "byte_count")]
    pub total_bytes_estimate: Option<u64>,
    #[serde(default, rename = "_percent_str")]
    pub percent_text: Option<String>,
    #[serde(default, rename = "_speed_str")]
    pub speed_text: Option<String>,
}

/// yt-dlp reports some byte counts as floats (estimates, fragment sums)
fn byte_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64))
}

impl ProgressEvent {
    /// Create a downloading event from raw byte counts
    pub fn downloading(downloaded: u64, total: Option<u64>) -> Self {
        Self {
            status: ProgressState::Downloading,
            downloaded_bytes: Some(downloaded),
            total_bytes: total,
            ..Default::default()
        }
    }

    /// Event for "download done, post-processing may follow"
    pub fn finished() -> Self {
        Self {
            status: ProgressState::Finished,
            ..Default::default()
        }
    }

    /// Fraction of the current request (0.0 to 1.0), if it can be known.
    ///
    /// Exact total first, then the estimate, then the percent text.
    pub fn fraction(&self) -> Option<f64> {
        let downloaded = self.downloaded_bytes.unwrap_or(0) as f64;

        let by_bytes = self
            .total_bytes
            .filter(|t| *t > 0)
            .or(self.total_bytes_estimate.filter(|t| *t > 0))
            .map(|total| downloaded / total as f64);

        by_bytes
            .or_else(|| self.percent_text.as_deref().and_then(parse_percent))
            .map(|f| f.clamp(0.0, 1.0))
    }

    /// Percent string for the status line, e.g. "42.0%"
    pub fn percent_label(&self) -> String {
        self.percent_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("0%")
            .to_string()
    }

    /// Speed string for the status line
    pub fn speed_label(&self) -> String {
        self.speed_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown speed")
            .to_string()
    }
}

/// Parse "  42.5%" into 0.425
fn parse_percent(text: &str) -> Option<f64> {
    text.trim()
        .strip_suffix('%')
        .and_then(|n| n.trim().parse::<f64>().ok())
        .map(|p| p / 100.0)
}

/// Overall progress of a batch: finished requests plus the running one
#[derive(Debug, Clone)]
pub struct BatchProgress {
    total: usize,
    index: usize,
    current: f64,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            index: 0,
            current: 0.0,
        }
    }

    /// Move to the request at zero-based `index`
    pub fn start_request(&mut self, index: usize) {
        self.index = index;
        self.current = 0.0;
    }

    /// Fold one event into the running request and return the overall value.
    ///
    /// The running request's share never goes backwards, even when yt-dlp
    /// starts on a second stream (separate video and audio downloads).
    pub fn apply(&mut self, event: &ProgressEvent) -> f32 {
        if event.status == ProgressState::Downloading {
            if let Some(fraction) = event.fraction() {
                if fraction > self.current {
                    self.current = fraction;
                }
            }
        }
        self.overall()
    }

    /// Overall progress (0.0 to 1.0)
    pub fn overall(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        let value = (self.index as f64 + self.current) / self.total as f64;
        value.clamp(0.0, 1.0) as f32
    }
}

/// Status line while yt-dlp resolves the URL
pub fn analyzing_status(ordinal: usize, total: usize) -> String {
    format!("Processing {}/{}: Analyzing URL...", ordinal, total)
}

/// Status line while bytes are arriving
pub fn downloading_status(ordinal: usize, total: usize, event: &ProgressEvent) -> String {
    format!(
        "Downloading {}/{}: {} at {}",
        ordinal,
        total,
        event.percent_label(),
        event.speed_label()
    )
}

/// Status line while ffmpeg merges or converts
pub fn converting_status(ordinal: usize, total: usize) -> String {
    format!("Processing {}/{}: Converting...", ordinal, total)
}
