//! # blitz_core - Blitzball team roster
//!
//! Loads blitzball players from a JSON data file, looks up level-appropriate
//! stats, and manages a team of up to eight players that can be saved to disk.
//!
//! ## Modules
//! - `data`: name-keyed player store loaded from the data file
//! - `models`: player records, stat lookup and the printable player card
//! - `team`: the roster, position slots and interactive choices
//! - `save`: team snapshots written as JSON files
//! - `config`: data file and save directory resolution

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod save;
pub mod team;

#[cfg(test)]
mod test_log;

pub use config::AppConfig;
pub use data::DataStore;
pub use error::{BlitzError, Result};
pub use models::{DisplayError, PlayerRecord, StatLine};
pub use save::{SaveStore, TeamSave};
pub use team::{ChoiceProvider, ConsolePrompt, RecruitOutcome, Roster, Slot};
