// Freewrite journaling core
// Dated plain-text entries on disk, Zen line mode, writing timer

pub mod commands;
pub mod error;
pub mod filename;
pub mod models;
pub mod storage;
pub mod zen;

pub use commands::entry::{create_entry, delete_entry, list_entries, load_entry, preview_text, save_entry};
pub use commands::export::{ChatService, chat_url};
pub use commands::journal::{EditorMode, Journal};
pub use commands::settings::{DirectoryChooser, NativeFolderPicker};
pub use commands::timer::{TimerEvent, WritingTimer};
pub use error::{FilenameError, StoreError};
pub use filename::EntryName;
pub use models::{Entry, Settings, Theme};
pub use storage::{Storage, normalize_header, resolve_directory};
pub use zen::ZenLines;

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber, filtered by RUST_LOG (default freewrite_lib=info).
/// Later calls are no-ops.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "freewrite_lib=info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Open the journal at the platform locations
pub fn open_journal() -> Result<Journal, StoreError> {
    init_logging();
    let storage = Storage::new()?;
    Journal::open(storage)
}
