use crate::models::PlayerRecord;
use crate::team::Slot;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk team snapshot: `{ "players": [...], "positions": {...} }`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TeamSave {
    /// Roster in recruit order, each with its full field set
    pub players: Vec<PlayerRecord>,

    /// Position slot → occupant name
    pub positions: BTreeMap<Slot, Option<String>>,
}

impl TeamSave {
    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.name.as_str())
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
