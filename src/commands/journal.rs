// Journal session - the state the single editor window works against
// One entry open at a time; the store is the only thing that touches disk

use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::entry::{create_entry, delete_entry, list_entries, load_entry, save_entry};
use super::export::{ChatService, chat_url};
use super::settings::DirectoryChooser;
use super::timer::{TimerEvent, WritingTimer};
use crate::error::StoreError;
use crate::models::Entry;
use crate::storage::{HEADER, Storage, normalize_header};
use crate::zen::{self, ZenLines};

/// Seed for the very first entry
pub const WELCOME_TEXT: &str = include_str!("../../assets/default.md");

pub const PLACEHOLDERS: [&str; 8] = [
    "\n\nBegin writing",
    "\n\nPick a thought and go",
    "\n\nStart typing",
    "\n\nWhat's on your mind",
    "\n\nJust start",
    "\n\nType your first thought",
    "\n\nStart with one sentence",
    "\n\nJust say it",
];

fn random_placeholder() -> &'static str {
    PLACEHOLDERS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PLACEHOLDERS[0])
}

/// Flat editing, or Zen mode's line-at-a-time view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Flat,
    Lines(ZenLines),
}

pub struct Journal {
    storage: Storage,
    dir: PathBuf,
    entries: Vec<Entry>,
    selected: Option<Uuid>,
    text: String,
    dirty: bool,
    mode: EditorMode,
    timer: WritingTimer,
    placeholder: &'static str,
}

impl Journal {
    /// Resolve the folder, load the newest entry, or create the first one
    pub fn open(storage: Storage) -> Result<Self, StoreError> {
        let mut journal = Self {
            storage,
            dir: PathBuf::new(),
            entries: Vec::new(),
            selected: None,
            text: String::new(),
            dirty: false,
            mode: EditorMode::Flat,
            timer: WritingTimer::default(),
            placeholder: PLACEHOLDERS[0],
        };
        journal.reload()?;
        Ok(journal)
    }

    fn reload(&mut self) -> Result<(), StoreError> {
        self.dir = self.storage.resolve_directory();
        self.entries = list_entries(&self.dir);
        self.selected = None;
        self.mode = EditorMode::Flat;
        self.dirty = false;
        tracing::info!("[Journal::reload] {} entries in {}", self.entries.len(), self.dir.display());

        match self.entries.first() {
            Some(first) => {
                self.selected = Some(first.id());
                self.text = load_entry(&self.dir, first);
            }
            None => {
                self.new_entry()?;
            }
        }
        self.placeholder = random_placeholder();
        Ok(())
    }

    // ============================================
    // ACCESSORS
    // ============================================

    pub fn directory(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        let id = self.selected?;
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_zen(&self) -> bool {
        matches!(self.mode, EditorMode::Lines(_))
    }

    pub fn placeholder(&self) -> &str {
        self.placeholder
    }

    pub fn timer(&self) -> &WritingTimer {
        &self.timer
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// For appearance commands; directory changes go through the journal
    pub fn storage_mut(&mut self) -> &mut Storage {
        &mut self.storage
    }

    // ============================================
    // EDITING AND AUTOSAVE
    // ============================================

    /// Replace the flat buffer; persisted on the next tick
    pub fn edit(&mut self, text: impl Into<String>) {
        if self.is_zen() {
            tracing::debug!("[Journal::edit] Ignored in Zen mode");
            return;
        }
        self.text = text.into();
        self.dirty = true;
    }

    /// Once-per-second tick: autosave a changed buffer, then advance the timer.
    /// A failed save stays dirty and is retried on the next tick.
    pub fn tick(&mut self) -> TimerEvent {
        if self.dirty && !self.is_zen() {
            if let Err(e) = self.save_current() {
                tracing::error!("[Journal::tick] Autosave failed: {}", e);
            }
        }

        let event = self.timer.tick();
        if event == TimerEvent::Expired && self.is_zen() {
            if let Err(e) = self.exit_zen() {
                tracing::error!("[Journal::tick] Saving on Zen exit failed: {}", e);
            }
        }
        event
    }

    fn save_current(&mut self) -> Result<(), StoreError> {
        let Some(id) = self.selected else {
            return Ok(());
        };
        let Some(entry) = self.entries.iter_mut().find(|e| e.id() == id) else {
            return Ok(());
        };
        save_entry(&self.dir, entry, &self.text)?;
        self.dirty = false;
        Ok(())
    }

    /// Persist whatever is being edited, leaving Zen mode if needed
    pub fn flush(&mut self) -> Result<(), StoreError> {
        if self.is_zen() {
            self.exit_zen()
        } else if self.dirty {
            self.save_current()
        } else {
            Ok(())
        }
    }

    // ============================================
    // ENTRIES
    // ============================================

    /// Save the current entry, then start a new one at the top of the list
    pub fn new_entry(&mut self) -> Result<&Entry, StoreError> {
        self.flush()?;

        let seed = if self.entries.is_empty() {
            format!("{}{}", HEADER, WELCOME_TEXT)
        } else {
            HEADER.to_string()
        };
        let entry = create_entry(&self.dir, &seed)?;

        self.text = normalize_header(&seed);
        self.selected = Some(entry.id());
        self.dirty = false;
        self.placeholder = random_placeholder();
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    /// Save the current entry and open another
    pub fn select(&mut self, id: Uuid) -> Result<(), StoreError> {
        if self.selected == Some(id) {
            return Ok(());
        }
        let Some(index) = self.entries.iter().position(|e| e.id() == id) else {
            tracing::warn!("[Journal::select] No entry with id {}", id);
            return Ok(());
        };
        self.flush()?;

        self.text = load_entry(&self.dir, &self.entries[index]);
        self.selected = Some(id);
        self.dirty = false;
        Ok(())
    }

    /// Delete an entry's file and drop it from the list. When the open entry
    /// goes, the newest remaining one opens, or a fresh one is created.
    pub fn delete(&mut self, id: Uuid) -> Result<(), StoreError> {
        let Some(index) = self.entries.iter().position(|e| e.id() == id) else {
            return Ok(());
        };
        delete_entry(&self.dir, &self.entries[index])?;
        self.entries.remove(index);

        if self.selected != Some(id) {
            return Ok(());
        }
        self.selected = None;
        self.mode = EditorMode::Flat;
        self.dirty = false;

        match self.entries.first() {
            Some(first) => {
                self.selected = Some(first.id());
                self.text = load_entry(&self.dir, first);
            }
            None => {
                self.new_entry()?;
            }
        }
        Ok(())
    }

    // ============================================
    // ZEN MODE
    // ============================================

    /// Flat -> Lines. Pending edits are saved first.
    pub fn enter_zen(&mut self) -> Result<(), StoreError> {
        if self.is_zen() {
            return Ok(());
        }
        if self.dirty {
            self.save_current()?;
        }
        let (lines, reassigned) = zen::split(&self.text);
        self.text = reassigned;
        self.mode = EditorMode::Lines(lines);
        Ok(())
    }

    /// Lines -> Flat, saving the rebuilt text immediately
    pub fn exit_zen(&mut self) -> Result<(), StoreError> {
        let EditorMode::Lines(lines) = std::mem::replace(&mut self.mode, EditorMode::Flat) else {
            return Ok(());
        };
        self.text = lines.join();
        self.dirty = true;
        self.save_current()
    }

    pub fn zen_lines(&self) -> Option<&ZenLines> {
        match &self.mode {
            EditorMode::Lines(lines) => Some(lines),
            EditorMode::Flat => None,
        }
    }

    pub fn set_current_line(&mut self, line: impl Into<String>) {
        if let EditorMode::Lines(lines) = &mut self.mode {
            lines.current_line = line.into();
        }
    }

    /// Return pressed in Zen mode
    pub fn submit_line(&mut self) {
        if let EditorMode::Lines(lines) = &mut self.mode {
            self.text = lines.submit_line();
        }
    }

    // ============================================
    // TIMER
    // ============================================

    pub fn toggle_timer(&mut self) -> bool {
        self.timer.toggle()
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    // ============================================
    // DIRECTORY
    // ============================================

    /// Ask the chooser for a folder and switch to it. Ok(false) on cancel.
    pub fn change_directory(&mut self, chooser: &dyn DirectoryChooser) -> Result<bool, StoreError> {
        let Some(path) = chooser.choose_directory() else {
            return Ok(false);
        };
        self.flush()?;
        self.storage.set_custom_directory(&path)?;
        self.reload()?;
        Ok(true)
    }

    pub fn reset_to_default_directory(&mut self) -> Result<(), StoreError> {
        self.flush()?;
        self.storage.clear_custom_directory()?;
        self.reload()
    }

    // ============================================
    // EXPORT
    // ============================================

    pub fn chat_url(&self, service: ChatService) -> Option<String> {
        chat_url(service, &self.text)
    }
}
