// Common appearance types shared by settings and the session

use serde::{Deserialize, Serialize};

pub const DEFAULT_FONT: &str = "Lato-Regular";
pub const DEFAULT_FONT_SIZE: u32 = 18;

/// Fonts offered directly in the font menu
pub const STANDARD_FONTS: [&str; 4] = ["Lato-Regular", "Arial", ".AppleSystemUIFont", "Times New Roman"];

pub const FONT_SIZES: [u32; 6] = [16, 18, 20, 22, 24, 26];

/// Zen mode renders the single line much larger than the editor
pub const ZEN_FONT_SCALE: f64 = 2.2;

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

pub fn zen_font_size(font_size: u32) -> f64 {
    font_size as f64 * ZEN_FONT_SCALE
}
