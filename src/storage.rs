// Filesystem-based storage layer for Freewrite
// Owns paths, the settings file, directory resolution and atomic writes

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::Settings;

/// Visual top padding every non-empty entry body starts with
pub const HEADER: &str = "\n\n";

// ============================================
// PATH HELPERS
// ============================================

/// Global config directory (~/.freewrite/)
pub fn global_config_dir() -> Result<PathBuf, StoreError> {
    let home = dirs::home_dir().ok_or(StoreError::NoDocumentsDir)?;
    Ok(home.join(".freewrite"))
}

/// Global config file path
pub fn global_config_path() -> Result<PathBuf, StoreError> {
    Ok(global_config_dir()?.join("config.md"))
}

/// Default entries directory (~/Documents/Freewrite)
pub fn default_entries_dir() -> Result<PathBuf, StoreError> {
    let documents = dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .ok_or(StoreError::NoDocumentsDir)?;
    Ok(documents.join("Freewrite"))
}

// ============================================
// FRONTMATTER PARSING
// ============================================

/// Parse YAML frontmatter from markdown content
pub fn parse_frontmatter<T: serde::de::DeserializeOwned>(content: &str) -> Option<(T, String)> {
    let content = content.trim();
    let rest = content.strip_prefix("---")?;
    let end = rest.find("\n---")?;
    let yaml = rest[..end].trim();
    let body = rest[end + 4..].trim().to_string();

    let frontmatter: T = serde_yaml::from_str(yaml).ok()?;
    Some((frontmatter, body))
}

/// Serialize frontmatter + body to markdown
pub fn to_markdown<T: serde::Serialize>(frontmatter: &T, body: &str) -> Result<String, StoreError> {
    let yaml = serde_yaml::to_string(frontmatter)
        .map_err(|e| StoreError::Config(format!("YAML error: {}", e)))?;
    Ok(format!("---\n{}---\n\n{}", yaml, body))
}

// ============================================
// TEXT NORMALIZATION
// ============================================

/// Ensure content carries exactly the two-newline header.
/// Content with >= 2 leading newlines is kept, 1 gets one more, 0 gets two;
/// blank content collapses to the bare header.
pub fn normalize_header(text: &str) -> String {
    if text.trim().is_empty() {
        return HEADER.to_string();
    }
    if text.starts_with(HEADER) {
        text.to_string()
    } else if text.starts_with('\n') {
        format!("\n{}", text)
    } else {
        format!("{}{}", HEADER, text)
    }
}

// ============================================
// ATOMIC WRITES
// ============================================

/// Write through a sibling temp file, flushed to disk, then rename over the target
pub fn atomic_write(path: &Path, content: &str) -> Result<(), StoreError> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    // Leading dot keeps a stray temp file out of entry listings
    let tmp = path.with_file_name(format!(".{}.tmp", filename));

    write_synced(&tmp, content).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(&tmp, e)
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        StoreError::io(path, e)
    })
}

fn write_synced(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

// ============================================
// DIRECTORY RESOLUTION
// ============================================

/// Pick the entries directory. An override that is missing or not a
/// directory is cleared and the default is used; the default is created
/// on demand.
pub fn resolve_directory(custom_path: &mut Option<String>, default_dir: &Path) -> PathBuf {
    if let Some(path) = custom_path.as_deref() {
        let candidate = PathBuf::from(path);
        if candidate.is_dir() {
            return candidate;
        }
        tracing::warn!(
            "[resolve_directory] Custom directory is invalid or not a directory: {}. Resetting to default.",
            path
        );
        *custom_path = None;
    }

    if !default_dir.exists() {
        match fs::create_dir_all(default_dir) {
            Ok(()) => tracing::info!("[resolve_directory] Created default directory {}", default_dir.display()),
            Err(e) => tracing::error!(
                "[resolve_directory] Error creating default directory {}: {}",
                default_dir.display(),
                e
            ),
        }
    }
    default_dir.to_path_buf()
}

// ============================================
// STORAGE STATE
// ============================================

/// Settings plus the two locations the core writes to
#[derive(Debug)]
pub struct Storage {
    config_path: PathBuf,
    default_dir: PathBuf,
    pub settings: Settings,
}

impl Storage {
    /// Storage over the platform locations, loading the global config
    pub fn new() -> Result<Self, StoreError> {
        Ok(Self::with_paths(global_config_path()?, default_entries_dir()?))
    }

    pub fn with_paths(config_path: impl Into<PathBuf>, default_dir: impl Into<PathBuf>) -> Self {
        let config_path = config_path.into();
        let settings = load_settings(&config_path);
        tracing::debug!(
            "[Storage::with_paths] Loaded settings, customDirectoryPath: {:?}",
            settings.custom_directory_path
        );
        Self {
            config_path,
            default_dir: default_dir.into(),
            settings,
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn default_dir(&self) -> &Path {
        &self.default_dir
    }

    /// Resolve the entries directory, persisting a cleared override
    pub fn resolve_directory(&mut self) -> PathBuf {
        let had_override = self.settings.custom_directory_path.is_some();
        let dir = resolve_directory(&mut self.settings.custom_directory_path, &self.default_dir);

        if had_override && self.settings.custom_directory_path.is_none() {
            if let Err(e) = self.save_settings() {
                tracing::error!("[Storage::resolve_directory] Could not persist cleared override: {}", e);
            }
        }
        dir
    }

    pub fn set_custom_directory(&mut self, path: &Path) -> Result<(), StoreError> {
        self.settings.custom_directory_path = Some(path.to_string_lossy().to_string());
        tracing::info!("[Storage::set_custom_directory] Custom directory selected: {}", path.display());
        self.save_settings()
    }

    pub fn clear_custom_directory(&mut self) -> Result<(), StoreError> {
        self.settings.custom_directory_path = None;
        tracing::info!("[Storage::clear_custom_directory] Reset to default directory");
        self.save_settings()
    }

    pub fn save_settings(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let content = to_markdown(&self.settings, "# Freewrite settings\n")?;
        atomic_write(&self.config_path, &content)
    }
}

fn load_settings(path: &Path) -> Settings {
    if !path.exists() {
        tracing::debug!("[load_settings] Config file does not exist, using defaults");
        return Settings::default();
    }

    match fs::read_to_string(path) {
        Ok(content) => parse_frontmatter::<Settings>(&content)
            .map(|(settings, _)| settings)
            .unwrap_or_else(|| {
                tracing::warn!("[load_settings] Failed to parse frontmatter in {}, using defaults", path.display());
                Settings::default()
            }),
        Err(e) => {
            tracing::error!("[load_settings] Could not read {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Theme;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Hello"), "\n\nHello");
        assert_eq!(normalize_header("\nHello"), "\n\nHello");
        assert_eq!(normalize_header("\n\nHello"), "\n\nHello");
        assert_eq!(normalize_header("\n\n\nHello"), "\n\n\nHello");
        assert_eq!(normalize_header(""), "\n\n");
        assert_eq!(normalize_header(" \n\t\n\n\n"), "\n\n");
    }

    #[test]
    fn test_normalize_header_is_idempotent() {
        for text in ["", "a", "\na", "\n\na\n", "  \n", "\n\n\n\nx"] {
            let once = normalize_header(text);
            assert_eq!(normalize_header(&once), once);
        }
    }

    #[test]
    fn test_frontmatter_roundtrip() {
        let settings = Settings {
            custom_directory_path: Some("/tmp/journal".to_string()),
            theme: Theme::Dark,
            ..Settings::default()
        };
        let md = to_markdown(&settings, "body").unwrap();
        assert!(md.contains("customDirectoryPath: /tmp/journal"));
        assert!(md.contains("theme: dark"));

        let (parsed, body) = parse_frontmatter::<Settings>(&md).unwrap();
        assert_eq!(parsed, settings);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entry.md");
        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let names: Vec<_> = fs::read_dir(dir.path()).unwrap().filter_map(|e| e.ok()).collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_atomic_write_failure_keeps_previous_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entry.md");
        atomic_write(&path, "kept").unwrap();

        // A directory squatting on the temp name makes the temp write fail
        fs::create_dir(dir.path().join(".entry.md.tmp")).unwrap();
        assert!(matches!(atomic_write(&path, "lost"), Err(StoreError::Io { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    }

    #[test]
    fn test_resolve_directory_valid_override() {
        let custom = tempdir().unwrap();
        let default = tempdir().unwrap();
        let mut custom_path = Some(custom.path().to_string_lossy().to_string());

        let dir = resolve_directory(&mut custom_path, &default.path().join("Freewrite"));
        assert_eq!(dir, custom.path());
        assert!(custom_path.is_some());
    }

    #[test]
    fn test_resolve_directory_missing_override_falls_back() {
        let root = tempdir().unwrap();
        let default = root.path().join("Documents").join("Freewrite");
        let mut custom_path = Some(root.path().join("gone").to_string_lossy().to_string());

        let dir = resolve_directory(&mut custom_path, &default);
        assert_eq!(dir, default);
        assert!(custom_path.is_none());
        assert!(default.is_dir());
    }

    #[test]
    fn test_resolve_directory_file_override_falls_back() {
        let root = tempdir().unwrap();
        let file = root.path().join("not-a-dir.txt");
        fs::write(&file, "x").unwrap();
        let default = root.path().join("Freewrite");
        let mut custom_path = Some(file.to_string_lossy().to_string());

        assert_eq!(resolve_directory(&mut custom_path, &default), default);
        assert!(custom_path.is_none());
    }

    #[test]
    fn test_storage_clears_and_persists_invalid_override() {
        let root = tempdir().unwrap();
        let config = root.path().join(".freewrite").join("config.md");
        let default = root.path().join("Freewrite");

        let mut storage = Storage::with_paths(&config, &default);
        storage.set_custom_directory(&root.path().join("missing")).unwrap();

        let mut reopened = Storage::with_paths(&config, &default);
        assert!(reopened.settings.custom_directory_path.is_some());
        assert_eq!(reopened.resolve_directory(), default);
        assert!(reopened.settings.custom_directory_path.is_none());

        let again = Storage::with_paths(&config, &default);
        assert!(again.settings.custom_directory_path.is_none());
    }

    #[test]
    fn test_storage_unparseable_config_uses_defaults() {
        let root = tempdir().unwrap();
        let config = root.path().join("config.md");
        fs::write(&config, "not frontmatter at all").unwrap();

        let storage = Storage::with_paths(&config, root.path().join("Freewrite"));
        assert_eq!(storage.settings, Settings::default());
    }
}
