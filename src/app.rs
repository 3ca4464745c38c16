//! Application initialization and main entry point

use crate::gui::SocialloaderApp;
use crate::utils::config::AppSettings;
use anyhow::Result;
use iced::{Application, Settings};

/// Run the Social Media Downloader window until it is closed
pub fn run(app_settings: AppSettings) -> Result<()> {
    let mut settings = Settings::with_flags(app_settings);
    settings.window.size = iced::Size::new(720.0, 760.0);
    settings.window.min_size = Some(iced::Size::new(600.0, 640.0));
    settings.antialiasing = true;

    SocialloaderApp::run(settings)?;

    Ok(())
}
