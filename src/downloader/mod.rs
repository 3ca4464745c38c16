//! Download progress model

pub mod progress;

// Re-export for convenience
pub use progress::{
    analyzing_status, converting_status, downloading_status, BatchProgress, ProgressEvent,
    ProgressState,
};
