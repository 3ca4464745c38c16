//! Multi-line URL input component

use crate::gui::app::Message;
use iced::widget::{button, column, row, text, text_editor, tooltip, Space};
use iced::{Alignment, Element, Length};

/// URL editor with paste/clear buttons and an optional error message
pub fn url_input<'a>(
    content: &'a text_editor::Content,
    error_message: Option<&str>,
) -> Element<'a, Message> {
    use crate::gui::theme;

    let header = row![
        text("URLs (one per line):")
            .size(14)
            .style(iced::theme::Text::Color(theme::TEXT)),
        Space::with_width(Length::Fill),
        tooltip(
            button(text("Paste").size(14))
                .on_press(Message::PasteFromClipboard)
                .padding([6, 12])
                .style(iced::theme::Button::Custom(Box::new(theme::ActionButton::Flat))),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        button(text("Clear").size(14))
            .on_press(Message::ClearUrlInput)
            .padding([6, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::ActionButton::Flat))),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    let editor = text_editor(content)
        .on_action(Message::UrlEditorAction)
        .height(Length::Fixed(130.0))
        .padding(12);

    let mut col = column![header, editor].spacing(8);

    if let Some(error) = error_message {
        col = col.push(
            row![
                text("Warning: ").size(14).style(theme::DANGER),
                text(error.to_string())
                    .size(14)
                    .style(iced::theme::Text::Color(theme::DANGER)),
            ]
            .spacing(4),
        );
    }

    col.into()
}
