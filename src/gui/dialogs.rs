//! Modal notifications

use rfd::{MessageButtons, MessageDialog, MessageLevel};
use tracing::debug;

/// Show a modal error box and wait for the user to close it
pub fn show_error(title: &str, description: &str) {
    debug!("Showing error dialog: {}", title);
    let _ = MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}
