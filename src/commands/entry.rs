// Entry commands - list, create, save, load, delete

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::StoreError;
use crate::filename;
use crate::models::Entry;
use crate::storage::{atomic_write, normalize_header};

const PREVIEW_CHARS: usize = 30;

/// Shown in the editor when an entry's file cannot be read
pub const LOAD_ERROR_TEXT: &str = "\n\nError: Could not load this entry.";

/// Sidebar excerpt: newlines flattened, trimmed, cut at 30 chars with "..."
pub fn preview_text(content: &str) -> String {
    let flat = content.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat.to_string()
    }
}

fn read_preview(path: &Path) -> String {
    fs::read_to_string(path)
        .map(|content| preview_text(&content))
        .unwrap_or_default()
}

/// Scan a directory for entries, most recent first.
/// Unreadable directories and foreign files yield nothing rather than errors.
pub fn list_entries(dir: &Path) -> Vec<Entry> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(e) => {
            tracing::error!("[list_entries] Error reading {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut entries: Vec<Entry> = read
        .filter_map(|e| e.ok())
        .filter(|e| {
            !e.path().is_dir() && !e.file_name().to_string_lossy().starts_with('.')
        })
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            match filename::decode(&name) {
                Ok(parsed) => Some(Entry {
                    name: parsed,
                    preview_text: read_preview(&e.path()),
                    filename: name,
                }),
                Err(err) => {
                    tracing::debug!("[list_entries] Skipping {}: {}", name, err);
                    None
                }
            }
        })
        .collect();

    // Stable sort keeps enumeration order for equal timestamps
    entries.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    tracing::debug!("[list_entries] Found {} entries in {}", entries.len(), dir.display());
    entries
}

/// Allocate a new entry and write its seed content
pub fn create_entry(dir: &Path, seed: &str) -> Result<Entry, StoreError> {
    let mut entry = Entry::create_new();
    save_entry(dir, &mut entry, seed)?;
    tracing::info!("[create_entry] Created {}", entry.filename);
    Ok(entry)
}

/// Overwrite an entry's file with normalized content; returns the new preview
pub fn save_entry(dir: &Path, entry: &mut Entry, content: &str) -> Result<String, StoreError> {
    let path = dir.join(&entry.filename);
    let normalized = normalize_header(content);

    atomic_write(&path, &normalized).map_err(|e| {
        tracing::error!("[save_entry] Error saving {}: {}", entry.filename, e);
        e
    })?;
    tracing::debug!("[save_entry] Saved {} ({} bytes)", entry.filename, normalized.len());

    entry.preview_text = preview_text(&normalized);
    Ok(entry.preview_text.clone())
}

/// Read an entry's body; a missing or unreadable file gives placeholder text
pub fn load_entry(dir: &Path, entry: &Entry) -> String {
    let path = dir.join(&entry.filename);
    match fs::read_to_string(&path) {
        Ok(content) => {
            tracing::debug!("[load_entry] Loaded {}", entry.filename);
            normalize_header(&content)
        }
        Err(e) => {
            tracing::error!("[load_entry] Error loading {}: {}", entry.filename, e);
            LOAD_ERROR_TEXT.to_string()
        }
    }
}

/// Remove an entry's file. A file that is already gone counts as deleted.
pub fn delete_entry(dir: &Path, entry: &Entry) -> Result<(), StoreError> {
    let path = dir.join(&entry.filename);
    match fs::remove_file(&path) {
        Ok(()) => {
            tracing::info!("[delete_entry] Deleted {}", entry.filename);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("[delete_entry] Already gone: {}", path.display());
            Ok(())
        }
        Err(e) => {
            tracing::error!("[delete_entry] Error deleting {}: {}", entry.filename, e);
            Err(StoreError::io(path, e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filename::EntryName;
    use chrono::NaiveDate;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn entry_at(day: u32, hour: u32) -> Entry {
        let created = NaiveDate::from_ymd_opt(2025, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        Entry::from_name(EntryName::new(Uuid::new_v4(), created))
    }

    #[test]
    fn test_preview_text() {
        assert_eq!(preview_text("\n\nHello\nWorld"), "Hello World");
        assert_eq!(preview_text("\n\n"), "");
        assert_eq!(
            preview_text("\n\nThe quick brown fox jumps over the lazy dog"),
            "The quick brown fox jumps over..."
        );
        assert_eq!(preview_text("exactly thirty characters long"), "exactly thirty characters long");
        assert_eq!(preview_text(&"é".repeat(31)), format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn test_create_and_load_entry() {
        let dir = tempdir().unwrap();
        let entry = create_entry(dir.path(), "Welcome").unwrap();

        let on_disk = fs::read_to_string(dir.path().join(&entry.filename)).unwrap();
        assert_eq!(on_disk, "\n\nWelcome");
        assert_eq!(entry.preview_text, "Welcome");
        assert_eq!(load_entry(dir.path(), &entry), "\n\nWelcome");
        assert_eq!(filename::decode(&entry.filename).unwrap(), entry.name);
    }

    #[test]
    fn test_save_entry_normalizes_and_updates_preview() {
        let dir = tempdir().unwrap();
        let mut entry = create_entry(dir.path(), "\n\n").unwrap();

        let preview = save_entry(dir.path(), &mut entry, "\nDear diary").unwrap();
        assert_eq!(preview, "Dear diary");
        assert_eq!(entry.preview_text, "Dear diary");
        assert_eq!(
            fs::read_to_string(dir.path().join(&entry.filename)).unwrap(),
            "\n\nDear diary"
        );

        save_entry(dir.path(), &mut entry, "   ").unwrap();
        assert_eq!(fs::read_to_string(dir.path().join(&entry.filename)).unwrap(), "\n\n");
        assert_eq!(entry.preview_text, "");
    }

    #[test]
    fn test_save_entry_into_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let mut entry = entry_at(1, 8);
        let result = save_entry(&dir.path().join("missing"), &mut entry, "text");
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_load_normalizes_external_edits() {
        let dir = tempdir().unwrap();
        let entry = entry_at(2, 10);
        fs::write(dir.path().join(&entry.filename), "written elsewhere").unwrap();
        assert_eq!(load_entry(dir.path(), &entry), "\n\nwritten elsewhere");
    }

    #[test]
    fn test_load_missing_file_gives_placeholder() {
        let dir = tempdir().unwrap();
        assert_eq!(load_entry(dir.path(), &entry_at(2, 10)), LOAD_ERROR_TEXT);
    }

    #[test]
    fn test_list_entries_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        let older = entry_at(1, 9);
        let newest = entry_at(3, 9);
        let middle = entry_at(2, 9);
        for (entry, body) in [(&older, "old"), (&newest, "new"), (&middle, "mid")] {
            fs::write(dir.path().join(&entry.filename), format!("\n\n{}", body)).unwrap();
        }
        fs::write(dir.path().join("README.md"), "not an entry").unwrap();
        fs::write(dir.path().join(".DS_Store"), "").unwrap();
        fs::write(dir.path().join(format!(".{}", older.filename)), "hidden").unwrap();
        fs::create_dir(dir.path().join(entry_at(4, 9).filename)).unwrap();

        let entries = list_entries(dir.path());
        let ids: Vec<_> = entries.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![newest.id(), middle.id(), older.id()]);
        assert_eq!(entries[0].preview_text, "new");
        assert_eq!(entries[2].filename, older.filename);
    }

    #[test]
    fn test_list_entries_ties_keep_enumeration_order() {
        let dir = tempdir().unwrap();
        let created = entry_at(5, 12).created_at();
        for body in ["a", "b", "c", "d", "e", "f"] {
            let entry = Entry::from_name(EntryName::new(Uuid::new_v4(), created));
            fs::write(dir.path().join(&entry.filename), body).unwrap();
        }
        let later = entry_at(6, 12);
        fs::write(dir.path().join(&later.filename), "later").unwrap();

        let enumerated: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| *name != later.filename)
            .collect();

        let listed: Vec<String> = list_entries(dir.path()).into_iter().map(|e| e.filename).collect();
        assert_eq!(listed[0], later.filename);
        assert_eq!(listed[1..], enumerated[..]);
    }

    #[test]
    fn test_unreadable_entry_lists_with_empty_preview() {
        let dir = tempdir().unwrap();
        let entry = entry_at(7, 8);
        fs::write(dir.path().join(&entry.filename), [0xffu8, 0xfe]).unwrap();

        let entries = list_entries(dir.path());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), entry.id());
        assert_eq!(entries[0].preview_text, "");
        assert_eq!(load_entry(dir.path(), &entries[0]), LOAD_ERROR_TEXT);
    }

    #[test]
    fn test_list_entries_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(list_entries(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn test_list_entries_keeps_original_filename() {
        let dir = tempdir().unwrap();
        let name = "[0F8FAD5B-D9CB-469F-A165-70867728950E]-[2025-02-14-21-07-03].md";
        fs::write(dir.path().join(name), "\n\nfrom another machine").unwrap();

        let entries = list_entries(dir.path());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, name);
        assert_eq!(load_entry(dir.path(), &entries[0]), "\n\nfrom another machine");
    }

    #[test]
    fn test_delete_entry() {
        let dir = tempdir().unwrap();
        let entry = create_entry(dir.path(), "bye").unwrap();

        delete_entry(dir.path(), &entry).unwrap();
        assert!(!dir.path().join(&entry.filename).exists());
        // Already removed externally
        delete_entry(dir.path(), &entry).unwrap();
    }
}
