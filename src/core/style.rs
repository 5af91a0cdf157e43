// LogTint - core/style.rs
//
// Renderer-neutral styling: one colour/weight/slant per token kind.
// Terminal, HTML and GUI renderers each translate `TokenStyle` into their
// own representation.

use crate::core::model::TokenKind;
use serde::Serialize;
use std::fmt;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// How one token kind is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TokenStyle {
    pub colour: Rgb,
    pub bold: bool,
    pub italic: bool,
}

impl TokenStyle {
    pub const fn new(colour: Rgb, bold: bool, italic: bool) -> Self {
        Self {
            colour,
            bold,
            italic,
        }
    }
}

/// One style per token kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: [TokenStyle; TokenKind::COUNT],
}

impl Theme {
    pub fn style(&self, kind: TokenKind) -> &TokenStyle {
        &self.styles[kind.index()]
    }

    pub fn set_style(&mut self, kind: TokenKind, style: TokenStyle) {
        self.styles[kind.index()] = style;
    }
}

impl Default for Theme {
    /// The historical log-viewer palette.
    fn default() -> Self {
        Self {
            // Indexed by TokenKind declaration order.
            styles: [
                TokenStyle::new(Rgb::new(0x7F, 0x9B, 0xEB), true, false), // Date: steel blue
                TokenStyle::new(Rgb::new(0xA5, 0xC1, 0xD1), false, false), // Time: slate grey
                TokenStyle::new(Rgb::new(0xF4, 0x5D, 0x5D), false, true), // Milliseconds: tomato
                TokenStyle::new(Rgb::new(0xF6, 0xA8, 0x00), true, false), // Frame ID header: gold
                TokenStyle::new(Rgb::new(0xFF, 0x8C, 0x00), true, false), // Data header: orange
                TokenStyle::new(Rgb::new(0x8D, 0xCA, 0x3E), false, false), // Frame ID payload: green
                TokenStyle::new(Rgb::new(0x4C, 0xAF, 0x50), false, false), // Data payload: darker green
            ],
        }
    }
}
