// Models module for Freewrite
// Plain data; filesystem access lives in storage and commands

pub mod common;
pub mod config;
pub mod entry;

pub use common::{Theme, FONT_SIZES, STANDARD_FONTS};
pub use config::Settings;
pub use entry::Entry;
