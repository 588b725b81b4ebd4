//! Team roster management

pub mod prompt;
pub mod roster;

pub use prompt::{ChoiceProvider, ConsolePrompt};
pub use roster::{RecruitOutcome, Roster, Slot, CAPACITY, DEFAULT_PLAYERS};
