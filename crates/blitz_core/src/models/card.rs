//! Player card: the human-readable summary printed by `show`.

use super::player::{format_stat_line, PlayerRecord, BASE_TIER, START_KEY, START_LEVEL_FIELD};
use std::fmt::Write as _;
use std::io::Write;
use thiserror::Error;

/// Structural problems that keep a record from being displayed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisplayError {
    #[error("Stats not initialized for {name}. Check the data file.")]
    StatsMissing { name: String },

    #[error("Stats data for {name} is missing a 'start' value. Check the data file.")]
    StartMissing { name: String },

    #[error("Key '0' not found in learnable abilities for {name}. Check the data file.")]
    BaseTierMissing { name: String },

    #[error("Key {level} not found for {name}. Check the data file.")]
    StartLevelMissing { name: String, level: String },
}

impl PlayerRecord {
    /// Check the invariants the card relies on.
    pub fn validate(&self) -> Result<(), DisplayError> {
        if self.stats.is_empty() {
            return Err(DisplayError::StatsMissing { name: self.name.clone() });
        }

        let has_start_level = self
            .stats
            .get(START_KEY)
            .is_some_and(|start| start.contains_key(START_LEVEL_FIELD));
        if !has_start_level {
            return Err(DisplayError::StartMissing { name: self.name.clone() });
        }

        if !self.learnable_abilities.contains_key(BASE_TIER) {
            return Err(DisplayError::BaseTierMissing { name: self.name.clone() });
        }

        Ok(())
    }

    fn format_key_techniques(&self) -> String {
        if self.key_techniques.is_empty() {
            return "No Key Techniques".to_string();
        }

        self.key_techniques
            .iter()
            .enumerate()
            .map(|(i, tech)| format!("{}. {}", i + 1, tech))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_starting_stats(&self) -> Result<String, DisplayError> {
        let level = self.start_level().unwrap_or_default();
        let line = self.stats.get(&level).ok_or_else(|| DisplayError::StartLevelMissing {
            name: self.name.clone(),
            level: level.clone(),
        })?;

        Ok(format_stat_line(line))
    }

    fn format_learnable_techs(&self) -> String {
        let mut techs: Vec<&str> =
            self.abilities_at_tier(BASE_TIER).iter().map(String::as_str).collect();
        if techs.is_empty() {
            return "No Learnable Techniques".to_string();
        }
        techs.sort_unstable();
        techs.join("\n")
    }

    /// Render the full card, or the first structural problem found.
    pub fn render_info(&self) -> Result<String, DisplayError> {
        self.validate()?;
        let key_techs = self.format_key_techniques();
        let starting_stats = self.format_starting_stats()?;
        let learnable_techs = self.format_learnable_techs();

        let border = "*".repeat(self.name.chars().count() + 4);
        let mut card = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(card, "{border}");
        let _ = writeln!(card, "* {} *", self.name);
        let _ = writeln!(card, "{border}");
        let _ = writeln!(card, "Location: {}", self.location);
        let _ = writeln!(card, "Key Techniques:\n{key_techs}\n");
        let _ = writeln!(card, "Starting Stats:\n{starting_stats}");
        let _ = writeln!(card, "Learnable Techniques:\n{learnable_techs}");
        Ok(card)
    }

    /// Best-effort display: problems are logged and nothing is written.
    pub fn display_info(&self, out: &mut impl Write) {
        match self.render_info() {
            Ok(card) => {
                if let Err(e) = out.write_all(card.as_bytes()) {
                    log::error!("Error displaying player info: {}", e);
                }
            }
            Err(e) => log::error!("Error displaying player info: {}", e),
        }
    }
}
