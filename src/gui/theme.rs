//! Styles for the single-card downloader window - Light Theme
//!
//! Widgets without a custom style fall back to `Theme::Light`.

use iced::widget::{button, container, progress_bar, text_input};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Palette ---

pub const WINDOW_BG: Color = Color::from_rgb(0.945, 0.953, 0.969); // Slate 100
pub const CARD_BG: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const GROUP_BG: Color = Color::from_rgb(0.973, 0.976, 0.984); // Slate 50
pub const BORDER: Color = Color::from_rgb(0.886, 0.910, 0.941); // Slate 200

pub const TEXT: Color = Color::from_rgb(0.118, 0.161, 0.231); // Slate 800
pub const TEXT_MUTED: Color = Color::from_rgb(0.392, 0.455, 0.545); // Slate 500
pub const TEXT_FAINT: Color = Color::from_rgb(0.580, 0.639, 0.722); // Slate 400

pub const PRIMARY: Color = Color::from_rgb(0.149, 0.388, 0.922); // Blue 600
pub const PRIMARY_HOVER: Color = Color::from_rgb(0.114, 0.306, 0.847); // Blue 700
pub const PRIMARY_SOFT: Color = Color::from_rgb(0.859, 0.918, 0.996); // Blue 100

pub const DANGER: Color = Color::from_rgb(0.863, 0.149, 0.149); // Red 600
pub const DANGER_SOFT: Color = Color::from_rgb(0.996, 0.886, 0.886); // Red 100

// --- Containers ---

/// Background behind the card
pub struct WindowContainer;

impl container::StyleSheet for WindowContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT),
            background: Some(Background::Color(WINDOW_BG)),
            ..Default::default()
        }
    }
}

/// The card holding every control
pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT),
            background: Some(Background::Color(CARD_BG)),
            border: Border {
                color: BORDER,
                width: 1.0,
                radius: 14.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.06),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 16.0,
            },
        }
    }
}

/// Boxed group for the format and quality options
pub struct OptionGroup;

impl container::StyleSheet for OptionGroup {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(GROUP_BG)),
            border: Border {
                color: BORDER,
                width: 1.0,
                radius: 10.0.into(),
            },
            ..Default::default()
        }
    }
}

// --- Buttons ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionButton {
    /// Start Download
    Primary,
    /// Browse / Open Folder
    Secondary,
    /// Cancel
    Cancel,
    /// Paste / Clear above the editor
    Flat,
}

impl ActionButton {
    fn colors(&self) -> (Option<Color>, Color, Color) {
        // (background, text, border)
        match self {
            ActionButton::Primary => (Some(PRIMARY), CARD_BG, PRIMARY),
            ActionButton::Secondary => (Some(CARD_BG), TEXT, BORDER),
            ActionButton::Cancel => (None, DANGER, DANGER_SOFT),
            ActionButton::Flat => (None, TEXT_MUTED, Color::TRANSPARENT),
        }
    }
}

impl button::StyleSheet for ActionButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color, border) = self.colors();
        button::Appearance {
            background: background.map(Background::Color),
            text_color,
            border: Border {
                color: border,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        let background = match self {
            ActionButton::Primary => PRIMARY_HOVER,
            ActionButton::Secondary => GROUP_BG,
            ActionButton::Cancel => DANGER_SOFT,
            ActionButton::Flat => BORDER,
        };
        button::Appearance {
            background: Some(Background::Color(background)),
            ..active
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            background: active.background.map(|_| Background::Color(BORDER)),
            text_color: TEXT_FAINT,
            border: Border {
                color: BORDER,
                ..active.border
            },
            ..active
        }
    }
}

// --- Inputs ---

/// Destination directory field
pub struct PathInput;

impl text_input::StyleSheet for PathInput {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(CARD_BG),
            border: Border {
                radius: 8.0.into(),
                width: 1.0,
                color: BORDER,
            },
            icon_color: TEXT_MUTED,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        text_input::Appearance {
            border: Border {
                color: PRIMARY,
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        TEXT_FAINT
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        TEXT
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        PRIMARY_SOFT
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(GROUP_BG),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        TEXT_FAINT
    }
}

// --- Progress ---

/// Overall batch progress
pub struct BatchProgressBar;

impl progress_bar::StyleSheet for BatchProgressBar {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> progress_bar::Appearance {
        progress_bar::Appearance {
            background: Background::Color(PRIMARY_SOFT),
            bar: Background::Color(PRIMARY),
            border_radius: 5.0.into(),
        }
    }
}
