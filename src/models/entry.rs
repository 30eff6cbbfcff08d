// Entry model for filesystem-based storage
// Identity lives in the filename: [<uuid>]-[<yyyy-MM-dd-HH-mm-ss>].md

use chrono::{Local, NaiveDateTime, SubsecRound};
use uuid::Uuid;

use crate::filename::EntryName;

/// One journal session, backed by one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: EntryName,
    /// Filename as found on disk; never regenerated after creation
    pub filename: String,
    /// Derived from file contents, not persisted
    pub preview_text: String,
}

impl Entry {
    /// Fresh entry stamped with the current local time (whole seconds)
    pub fn create_new() -> Self {
        let now = Local::now().naive_local().trunc_subsecs(0);
        Self::from_name(EntryName::new(Uuid::new_v4(), now))
    }

    pub fn from_name(name: EntryName) -> Self {
        Self {
            filename: name.to_filename(),
            name,
            preview_text: String::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.name.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.name.created_at
    }

    /// Sidebar date, e.g. "Feb 14"
    pub fn display_date(&self) -> String {
        self.name.created_at.format("%b %-d").to_string()
    }
}
