//! Main view implementation - Light Theme

use crate::collector::{OutputKind, Quality};
use crate::gui::app::Message;
use crate::gui::components::{progress_bar, url_input};
use iced::widget::{
    button, column, container, pick_list, radio, row, text, text_editor, text_input, Space,
};
use iced::{Alignment, Element, Length};

/// Everything the main view needs from the application state
pub struct MainViewState<'a> {
    pub url_content: &'a text_editor::Content,
    pub input_error: Option<&'a str>,
    pub output_kind: OutputKind,
    pub quality: Quality,
    pub download_location: &'a str,
    pub progress: f32,
    pub status_message: &'a str,
    pub is_running: bool,
    pub is_cancelling: bool,
}

/// Create the main view
pub fn main_view(state: MainViewState<'_>) -> Element<'_, Message> {
    use crate::gui::theme;

    let header = column![
        text("Social Media Downloader")
            .size(28)
            .style(iced::theme::Text::Color(theme::TEXT)),
        text("Supports: YouTube, Instagram, Facebook")
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
    ]
    .spacing(4);

    // Video/audio choice; quality only matters for video
    let quality_control: Element<'_, Message> = if state.output_kind.is_audio() {
        text(format!("{} (quality setting is not used)", OutputKind::Audio.label()))
            .size(12)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED))
            .into()
    } else {
        pick_list(
            Quality::ALL.to_vec(),
            Some(state.quality),
            Message::QualitySelected,
        )
        .text_size(12)
        .padding([6, 10])
        .width(Length::Fixed(120.0))
        .into()
    };

    let options_row = row![
        container(
            column![
                text("Format")
                    .size(11)
                    .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
                row![
                    radio(
                        OutputKind::Video.label(),
                        OutputKind::Video,
                        Some(state.output_kind),
                        Message::OutputKindSelected,
                    )
                    .size(16)
                    .text_size(13),
                    radio(
                        OutputKind::Audio.label(),
                        OutputKind::Audio,
                        Some(state.output_kind),
                        Message::OutputKindSelected,
                    )
                    .size(16)
                    .text_size(13),
                ]
                .spacing(16),
            ]
            .spacing(6)
        )
        .padding([8, 12])
        .style(iced::theme::Container::Custom(Box::new(theme::OptionGroup))),
        container(
            column![
                text("Quality")
                    .size(11)
                    .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
                quality_control,
            ]
            .spacing(6)
        )
        .padding([8, 12])
        .style(iced::theme::Container::Custom(Box::new(theme::OptionGroup))),
    ]
    .spacing(12);

    let location_row = column![
        text("Output directory:")
            .size(14)
            .style(iced::theme::Text::Color(theme::TEXT)),
        row![
            text_input("Choose where files are saved", state.download_location)
                .on_input(Message::DownloadLocationChanged)
                .padding(10)
                .size(14)
                .style(iced::theme::TextInput::Custom(Box::new(theme::PathInput))),
            button(text("Browse").size(14))
                .on_press(Message::BrowseDownloadLocation)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::ActionButton::Secondary))),
            button(text("Open Folder").size(14))
                .on_press(Message::OpenDownloadFolder)
                .padding([10, 16])
                .style(iced::theme::Button::Custom(Box::new(theme::ActionButton::Secondary))),
        ]
        .spacing(8)
        .align_items(Alignment::Center),
    ]
    .spacing(8);

    // Start is disabled while a batch runs; Cancel only while it runs
    let controls = row![
        Space::with_width(Length::Fill),
        button(text("Cancel").size(16))
            .on_press_maybe(if state.is_running && !state.is_cancelling {
                Some(Message::CancelDownload)
            } else {
                None
            })
            .padding([14, 24])
            .style(iced::theme::Button::Custom(Box::new(
                theme::ActionButton::Cancel
            ))),
        button(
            text(if state.is_running {
                "Downloading..."
            } else {
                "Start Download"
            })
            .size(16)
        )
        .on_press_maybe(if state.is_running {
            None
        } else {
            Some(Message::StartDownload)
        })
        .padding([14, 32])
        .style(iced::theme::Button::Custom(Box::new(theme::ActionButton::Primary))),
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    let card = container(
        column![
            header,
            url_input(state.url_content, state.input_error),
            options_row,
            location_row,
            progress_bar(state.progress, state.status_message),
            controls,
        ]
        .spacing(20),
    )
    .padding(28)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::CardContainer,
    )));

    container(card)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(24)
        .style(iced::theme::Container::Custom(Box::new(
            theme::WindowContainer,
        )))
        .into()
}
