// Entry filename codec
// "[<uuid>]-[<yyyy-MM-dd-HH-mm-ss>].md" <-> (id, createdAt)

use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::FilenameError;

pub const ENTRY_EXTENSION: &str = ".md";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
const SEGMENT_SEPARATOR: &str = "]-[";
/// Hyphenated UUID, the only id form the app writes
const ID_LEN: usize = 36;
/// Zero-padded "yyyy-MM-dd-HH-mm-ss"
const TIMESTAMP_LEN: usize = 19;

/// Identity of an entry as encoded in its filename
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryName {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
}

impl EntryName {
    pub fn new(id: Uuid, created_at: NaiveDateTime) -> Self {
        Self { id, created_at }
    }

    pub fn to_filename(&self) -> String {
        encode(self.id, self.created_at)
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_filename())
    }
}

impl FromStr for EntryName {
    type Err = FilenameError;

    fn from_str(filename: &str) -> Result<Self, Self::Err> {
        decode(filename)
    }
}

/// Build the on-disk filename. Sub-second precision is dropped.
pub fn encode(id: Uuid, created_at: NaiveDateTime) -> String {
    format!("[{}]-[{}]{}", id, created_at.format(TIMESTAMP_FORMAT), ENTRY_EXTENSION)
}

/// Parse an on-disk filename; anything that is not an entry name is an error
pub fn decode(filename: &str) -> Result<EntryName, FilenameError> {
    let base = filename
        .strip_suffix(ENTRY_EXTENSION)
        .ok_or_else(|| FilenameError::MissingExtension(filename.to_string()))?;

    let segments: Vec<&str> = base.split(SEGMENT_SEPARATOR).collect();
    if segments.len() != 2 {
        return Err(FilenameError::SegmentCount(segments.len()));
    }

    let id_str = segments[0].strip_prefix('[').unwrap_or(segments[0]);
    let date_str = segments[1].strip_suffix(']').unwrap_or(segments[1]);
    if id_str.is_empty() || date_str.is_empty() {
        return Err(FilenameError::EmptySegment);
    }

    if id_str.len() != ID_LEN {
        return Err(FilenameError::MalformedId(id_str.to_string()));
    }
    if date_str.len() != TIMESTAMP_LEN {
        return Err(FilenameError::MalformedTimestamp(date_str.to_string()));
    }

    let id = Uuid::parse_str(id_str)?;
    let created_at = NaiveDateTime::parse_from_str(date_str, TIMESTAMP_FORMAT)?;
    Ok(EntryName { id, created_at })
}
