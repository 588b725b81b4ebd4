use super::prompt::ChoiceProvider;
use crate::data::DataStore;
use crate::error::{BlitzError, Result};
use crate::models::PlayerRecord;
use crate::save::{SaveStore, TeamSave};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

/// Maximum number of players on a team (6 starters + 2 bench)
pub const CAPACITY: usize = 8;

/// Players every new team starts with
pub const DEFAULT_PLAYERS: [&str; 6] = ["Tidus", "Datto", "Letty", "Jassu", "Botta", "Keepa"];

const _: () = assert!(DEFAULT_PLAYERS.len() <= CAPACITY);

/// Named position slots. Declaration order is the serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Slot {
    LF,
    RF,
    MF,
    LD,
    RD,
    GL,
    Bench1,
    Bench2,
}

impl Slot {
    pub const ALL: [Slot; 8] =
        [Slot::LF, Slot::RF, Slot::MF, Slot::LD, Slot::RD, Slot::GL, Slot::Bench1, Slot::Bench2];
}

/// Result of a recruit attempt that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecruitOutcome {
    /// Added to a team that had room
    Recruited,
    /// Added after `released` was dropped from a full team
    Replaced { released: String },
    /// The user declined to release anyone; the team is unchanged
    Cancelled,
}

/// The user's team: up to eight players in recruit order plus position slots.
///
/// Players are identified by name. Slots are reserved: nothing assigns them
/// yet, but they are kept and saved so a later lineup feature has a place to
/// live.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    players: Vec<PlayerRecord>,
    positions: BTreeMap<Slot, Option<String>>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::empty()
    }
}

impl Roster {
    /// Team with no players and every slot open
    pub fn empty() -> Self {
        Self {
            players: Vec::new(),
            positions: Slot::ALL.iter().map(|slot| (*slot, None)).collect(),
        }
    }

    /// New team seeded with [`DEFAULT_PLAYERS`] from `store`.
    pub fn new(store: &DataStore) -> Result<Self> {
        if store.is_empty() {
            log::error!("Error: Cannot create a team before player data is loaded.");
            return Err(BlitzError::Uninitialized);
        }

        let mut roster = Self::empty();
        for name in DEFAULT_PLAYERS {
            let player = store.get(name).map_err(|_| {
                log::error!("Error: Player {} not found. Check the data file.", name);
                BlitzError::NotFound(format!("Player {} not found. Check the data file.", name))
            })?;
            roster.append(player.clone())?;
        }

        log::info!("Team created with {} default players", roster.len());
        Ok(roster)
    }

    fn append(&mut self, player: PlayerRecord) -> Result<()> {
        if self.contains(&player.name) {
            log::info!("Info: {} is already on the team.", player.name);
            return Err(BlitzError::Duplicate { name: player.name });
        }
        self.players.push(player);
        Ok(())
    }

    /// Add `player` to the end of the team.
    ///
    /// When the team is full the user is asked (once) which member to
    /// release; declining leaves the team unchanged.
    pub fn recruit(
        &mut self,
        player: PlayerRecord,
        choices: &mut dyn ChoiceProvider,
    ) -> Result<RecruitOutcome> {
        if self.contains(&player.name) {
            log::info!("Info: {} is already on the team.", player.name);
            return Err(BlitzError::Duplicate { name: player.name });
        }

        if !self.is_full() {
            log::info!("Recruited {}", player.name);
            self.players.push(player);
            return Ok(RecruitOutcome::Recruited);
        }

        let choice = choices.choose_release(&self.names());
        let Some(index) = choice.filter(|i| *i < self.players.len()) else {
            log::info!("Recruitment of {} cancelled; team unchanged", player.name);
            return Ok(RecruitOutcome::Cancelled);
        };

        let released = self.players.remove(index);
        log::info!("Released {} to make room for {}", released.name, player.name);
        self.players.push(player);
        Ok(RecruitOutcome::Replaced { released: released.name })
    }

    /// Remove the player called `name`, returning their record.
    pub fn release(&mut self, name: &str) -> Result<PlayerRecord> {
        match self.players.iter().position(|p| p.name == name) {
            Some(index) => {
                let player = self.players.remove(index);
                log::info!("Released {}", player.name);
                Ok(player)
            }
            None => {
                log::info!(
                    "Info: Attempted to release {} from team, but {} was not on the team.",
                    name,
                    name
                );
                Err(BlitzError::NotOnTeam { name: name.to_string() })
            }
        }
    }

    /// Write `1. Name` lines in roster order, or a notice for an empty team
    pub fn list_team(&self, out: &mut impl Write) -> io::Result<()> {
        if self.players.is_empty() {
            return writeln!(out, "The team has no players.");
        }
        for (i, player) in self.players.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, player.name)?;
        }
        Ok(())
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn positions(&self) -> &BTreeMap<Slot, Option<String>> {
        &self.positions
    }

    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= CAPACITY
    }

    /// Snapshot of the team for saving
    pub fn serialize(&self) -> TeamSave {
        TeamSave { players: self.players.clone(), positions: self.positions.clone() }
    }

    /// Interactive save: ask for a name, confirm overwrites, write the file.
    ///
    /// Returns the written path, or `None` when the user abandons the save.
    pub fn save(
        &self,
        store: &SaveStore,
        choices: &mut dyn ChoiceProvider,
    ) -> Result<Option<PathBuf>> {
        let snapshot = self.serialize();
        loop {
            let Some(name) = choices.save_name() else {
                log::info!("Save abandoned");
                return Ok(None);
            };

            let exists = match store.exists(&name) {
                Ok(exists) => exists,
                // The store logs the rejected name; ask again
                Err(_) => continue,
            };
            if exists && !choices.confirm_overwrite(&name) {
                continue;
            }

            return store.write(&name, &snapshot).map(Some);
        }
    }

    /// Rebuild a team from the save called `name`.
    pub fn load(store: &SaveStore, name: &str) -> Result<Self> {
        let save = store.read(name)?;
        let invalid = |message: String| {
            let path = store.path_for(name).unwrap_or_else(|_| store.dir().join(name));
            log::error!("Error: save {} is invalid: {}", path.display(), message);
            BlitzError::Load { path, message }
        };

        if save.players.len() > CAPACITY {
            return Err(invalid(format!(
                "{} players exceeds the team limit of {}",
                save.players.len(),
                CAPACITY
            )));
        }

        let mut roster = Self::empty();
        for player in save.players {
            if roster.contains(&player.name) {
                return Err(invalid(format!("{} appears more than once", player.name)));
            }
            roster.players.push(player);
        }
        for (slot, occupant) in save.positions {
            roster.positions.insert(slot, occupant);
        }

        log::info!("Team loaded from save '{}' ({} players)", name, roster.len());
        Ok(roster)
    }
}
