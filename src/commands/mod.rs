// Commands module - the operations the editor window calls into

pub mod entry;
pub mod export;
pub mod journal;
pub mod settings;
pub mod timer;
