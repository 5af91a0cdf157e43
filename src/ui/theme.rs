// LogTint - ui/theme.rs
//
// Translation of token styles into egui text formats, plus layout constants.
// No dependencies on app state or business logic.
//
// egui's built-in fonts have no bold face, so `TokenStyle::bold` is carried
// by colour alone in the viewer; italic maps to `TextFormat::italics`.

use crate::core::style::{Rgb, TokenStyle};
use egui::text::TextFormat;
use egui::{Color32, FontId};

/// Convert a renderer-neutral colour.
pub fn to_color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

/// Foreground for unclassified text: near-white in dark mode, near-black in
/// light mode.
pub fn plain_text_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(212, 212, 212)
    } else {
        Color32::from_rgb(31, 41, 55)
    }
}

/// Text format for a classified run.
pub fn token_format(style: &TokenStyle, font_size: f32) -> TextFormat {
    TextFormat {
        font_id: FontId::monospace(font_size),
        color: to_color32(style.colour),
        italics: style.italic,
        ..Default::default()
    }
}

/// Text format for an unclassified run.
pub fn plain_format(font_size: f32, dark_mode: bool) -> TextFormat {
    TextFormat {
        font_id: FontId::monospace(font_size),
        color: plain_text_colour(dark_mode),
        ..Default::default()
    }
}

/// Viewer row height for a given monospace font size.
pub fn row_height(font_size: f32) -> f32 {
    (font_size * ROW_HEIGHT_FACTOR).round()
}

/// Layout constants.
pub const ROW_HEIGHT_FACTOR: f32 = 1.4;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
pub const SUMMARY_WINDOW_WIDTH: f32 = 360.0;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::TokenKind;
    use crate::core::style::Theme;

    #[test]
    fn test_token_format_uses_style() {
        let theme = Theme::default();
        let fmt = token_format(theme.style(TokenKind::MillisecondField), 14.0);
        assert_eq!(fmt.color, Color32::from_rgb(0xF4, 0x5D, 0x5D));
        assert!(fmt.italics);
        assert_eq!(fmt.font_id.size, 14.0);

        let fmt = token_format(theme.style(TokenKind::DateField), 14.0);
        assert!(!fmt.italics);
    }

    #[test]
    fn test_plain_colour_follows_mode() {
        assert_ne!(plain_text_colour(true), plain_text_colour(false));
    }
}
