//! Colors and the segment palette
//!
//! Segment fills cycle through a fixed, non-empty palette. Label colors are
//! picked per fill for contrast.

use std::str::FromStr;

use palette::color_difference::Wcag21RelativeContrast;
use palette::Srgb;

/// Error type for color parsing and palette construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// String is not a `#rrggbb` / `rrggbb` hex color
    InvalidHex(String),
    /// A palette needs at least one color
    EmptyPalette,
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorError::InvalidHex(s) => write!(f, "Invalid hex color: {}", s),
            ColorError::EmptyPalette => write!(f, "Palette requires at least one color"),
        }
    }
}

impl std::error::Error for ColorError {}

/// Named colors used by the default wheel theme
pub mod named {
    use palette::Srgb;

    pub const BLACK: Srgb<u8> = Srgb::new(0, 0, 0);
    pub const WHITE: Srgb<u8> = Srgb::new(255, 255, 255);
    pub const CHARTREUSE: Srgb<u8> = Srgb::new(127, 255, 0);
    pub const BLUE: Srgb<u8> = Srgb::new(0, 0, 255);
    pub const GREEN: Srgb<u8> = Srgb::new(0, 128, 0);
    pub const RED: Srgb<u8> = Srgb::new(255, 0, 0);
    pub const DEEP_PINK: Srgb<u8> = Srgb::new(255, 20, 147);
}

/// Parse "#rrggbb", "rrggbb" or the short "#rgb" form (case insensitive)
pub fn parse_hex(hex: &str) -> Result<Srgb<u8>, ColorError> {
    let trimmed = hex.trim();
    if !trimmed.is_ascii() {
        return Err(ColorError::InvalidHex(hex.to_string()));
    }
    Srgb::from_str(trimmed).map_err(|_| ColorError::InvalidHex(hex.to_string()))
}

pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:x}", color)
}

/// WCAG 2.1 contrast ratio between two colors, in [1, 21]
pub fn contrast_ratio(a: Srgb<u8>, b: Srgb<u8>) -> f32 {
    a.into_format::<f32>().relative_contrast(b.into_format())
}

/// Black or white, whichever reads better on top of `fill`
pub fn text_color(fill: Srgb<u8>) -> Srgb<u8> {
    if contrast_ratio(fill, named::BLACK) >= contrast_ratio(fill, named::WHITE) {
        named::BLACK
    } else {
        named::WHITE
    }
}

/// Ordered, non-empty list of fill colors, looked up cyclically
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Srgb<u8>>,
}

impl Palette {
    pub fn new(colors: Vec<Srgb<u8>>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Self, ColorError> {
        let colors = hexes
            .iter()
            .map(|h| parse_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for segment `index`, wrapping every `len()` segments
    pub fn color_at(&self, index: usize) -> Srgb<u8> {
        self.colors[index % self.colors.len()]
    }

    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }

    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().copied().map(to_hex).collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                named::CHARTREUSE,
                named::BLUE,
                named::GREEN,
                named::RED,
                named::DEEP_PINK,
            ],
        }
    }
}
