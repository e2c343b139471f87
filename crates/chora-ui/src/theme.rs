//! Colours and fonts shared by the views.

use iced::Font;
use iced::font::{Style, Weight};

pub mod colors {
    use iced::Color;

    /// `Color::from_rgb8` for constants.
    const fn rgb8(r: u8, g: u8, b: u8) -> Color {
        Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub const BG_DARK: Color = Color::from_rgb(0.11, 0.11, 0.13);
    pub const BG_MEDIUM: Color = Color::from_rgb(0.14, 0.14, 0.16);
    pub const BG_LIGHT: Color = Color::from_rgb(0.18, 0.18, 0.20);
    pub const BG_HOVER: Color = Color::from_rgb(0.22, 0.22, 0.25);
    pub const BG_ACTIVE: Color = Color::from_rgb(0.25, 0.25, 0.28);

    pub const TEXT_PRIMARY: Color = Color::from_rgb(0.93, 0.93, 0.93);
    pub const TEXT_SECONDARY: Color = Color::from_rgb(0.65, 0.65, 0.68);
    pub const TEXT_MUTED: Color = Color::from_rgb(0.45, 0.45, 0.48);

    pub const ACCENT: Color = Color::from_rgb(0.36, 0.54, 0.90);
    pub const BORDER: Color = Color::from_rgb(0.25, 0.25, 0.28);

    // Line-number gutter
    pub const GUTTER_BG: Color = rgb8(40, 44, 52);
    pub const GUTTER_TEXT: Color = rgb8(128, 128, 128);

    // Terminal panel
    pub const TERM_BG: Color = Color::from_rgb(0.07, 0.07, 0.09);
    pub const TERM_HEADER_BG: Color = Color::from_rgb(0.10, 0.10, 0.12);
    pub const TERM_ECHO: Color = Color::from_rgb(0.60, 0.78, 0.95);
    pub const TERM_ERROR: Color = rgb8(170, 0, 0);
    pub const TERM_WARNING: Color = rgb8(170, 85, 0);

    // Syntax
    pub const KEYWORD: Color = rgb8(198, 120, 221);
    pub const TYPE: Color = rgb8(209, 154, 102);
    pub const FUNCTION: Color = rgb8(97, 175, 239);
    pub const STRING: Color = rgb8(152, 195, 121);
    pub const NUMBER: Color = rgb8(209, 154, 102);
    pub const COMMENT: Color = rgb8(92, 99, 112);
    pub const PREPROCESSOR: Color = rgb8(229, 192, 123);
}

pub const EDITOR_FONT: Font = Font::MONOSPACE;

pub const EDITOR_FONT_BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::MONOSPACE
};

pub const EDITOR_FONT_ITALIC: Font = Font {
    style: Style::Italic,
    ..Font::MONOSPACE
};

/// Line height of the editor and the gutter, as a multiple of the font size.
pub const EDITOR_LINE_HEIGHT: f32 = 1.3;

/// Approximate advance of one monospace digit at `font_size`.
pub fn monospace_char_width(font_size: f32) -> f32 {
    font_size * 0.6
}
