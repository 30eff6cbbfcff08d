// Configuration model for Freewrite
// Stored as YAML frontmatter in ~/.freewrite/config.md, camelCase keys

use serde::{Deserialize, Serialize};

use super::common::{DEFAULT_FONT, DEFAULT_FONT_SIZE, Theme};

/// Persisted application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Override directory for entries; None means the platform default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_directory_path: Option<String>,
    pub theme: Theme,
    pub font_family: String,
    pub font_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            custom_directory_path: None,
            theme: Theme::Light,
            font_family: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}
