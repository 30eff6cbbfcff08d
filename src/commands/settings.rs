// Settings commands - storage folder and appearance

use rand::seq::SliceRandom;
use rfd::FileDialog;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::models::{FONT_SIZES, Theme};
use crate::storage::Storage;

/// Source of a user-chosen folder; None means the user cancelled
pub trait DirectoryChooser {
    fn choose_directory(&self) -> Option<PathBuf>;
}

/// Native folder picker
pub struct NativeFolderPicker;

impl DirectoryChooser for NativeFolderPicker {
    fn choose_directory(&self) -> Option<PathBuf> {
        let result = FileDialog::new()
            .set_title("Choose Freewrite Folder")
            .pick_folder();
        tracing::debug!("[NativeFolderPicker] Result: {:?}", result);
        result
    }
}

pub fn toggle_theme(storage: &mut Storage) -> Result<Theme, StoreError> {
    let theme = storage.settings.theme.toggled();
    storage.settings.theme = theme;
    tracing::info!("[toggle_theme] Theme is now {}", theme.name());
    storage.save_settings()?;
    Ok(theme)
}

pub fn set_font(storage: &mut Storage, family: &str) -> Result<(), StoreError> {
    tracing::info!("[set_font] Setting font to: {}", family);
    storage.settings.font_family = family.to_string();
    storage.save_settings()
}

/// Pick any family from the installed list; keeps the current font when the list is empty
pub fn random_font(storage: &mut Storage, available: &[String]) -> Result<String, StoreError> {
    match available.choose(&mut rand::thread_rng()) {
        Some(family) => {
            set_font(storage, family)?;
            Ok(family.clone())
        }
        None => Ok(storage.settings.font_family.clone()),
    }
}

/// Families whose name contains the search text, case-insensitively, sorted
pub fn filter_fonts(available: &[String], search: &str) -> Vec<String> {
    let needle = search.to_lowercase();
    let mut fonts: Vec<String> = available
        .iter()
        .filter(|family| needle.is_empty() || family.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    fonts.sort();
    fonts
}

pub fn set_font_size(storage: &mut Storage, size: u32) -> Result<(), StoreError> {
    if !FONT_SIZES.contains(&size) {
        return Err(StoreError::Config(format!("unsupported font size: {}", size)));
    }
    tracing::info!("[set_font_size] Setting font size to: {}", size);
    storage.settings.font_size = size;
    storage.save_settings()
}
