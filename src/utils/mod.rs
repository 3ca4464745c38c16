//! Utility modules for error handling, configuration and default paths

pub mod bundle_paths;
pub mod config;
pub mod error;

// Re-export for convenience
pub use bundle_paths::get_downloads_dir;
pub use config::{AppSettings, URL_PLACEHOLDER};
pub use error::{SocialloaderError, ValidationError};
