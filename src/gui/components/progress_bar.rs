//! Progress bar component

use crate::gui::app::Message;
use iced::widget::{column, progress_bar as iced_progress_bar, text};
use iced::Element;

/// Create the batch progress bar with the status line under it
pub fn progress_bar(progress: f32, status: &str) -> Element<'static, Message> {
    use crate::gui::theme;

    let bar = iced_progress_bar(0.0..=1.0, progress.clamp(0.0, 1.0))
        .height(10)
        .style(iced::theme::ProgressBar::Custom(Box::new(
            theme::BatchProgressBar,
        )));

    column![
        bar,
        text(status.to_string())
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
    ]
    .spacing(8)
    .into()
}
