//! Default locations that do not depend on the working directory
//!
//! When the app is launched from a desktop launcher the current working
//! directory is often `/`, so nothing here ever returns a relative path.

use std::path::PathBuf;
use tracing::{debug, warn};

/// Get the downloads directory.
///
/// Returns the platform Downloads folder, falling back to `~/Downloads`
/// and finally to the system temp directory.
pub fn get_downloads_dir() -> PathBuf {
    let dir = dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| {
            warn!("Could not determine Downloads directory, using temp dir");
            std::env::temp_dir()
        });

    debug!("Downloads directory: {:?}", dir);
    dir
}
