// Team save files
// Pretty JSON, one file per user-chosen name

pub mod format;
pub mod store;

pub use format::TeamSave;
pub use store::{SaveStore, SAVE_EXTENSION};
