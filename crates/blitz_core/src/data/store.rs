//! Player data store - JSON data file → name-keyed lookup table
//!
//! The data file is a single JSON object mapping each player's name to its
//! record body (`location`, `stats`, `key_techniques`, `learnable_abilities`).
//! Loads merge into the store; a name that is already present keeps its
//! first-loaded record.

use crate::error::{BlitzError, Result};
use crate::models::{PlayerFields, PlayerRecord};
use rustc_hash::FxHashMap;
use serde_json::Value;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Runtime lookup table for loaded players
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    /// Player lookup by name
    players: FxHashMap<String, PlayerRecord>,
    /// Names in the order they were first loaded
    order: Vec<String>,
}

impl DataStore {
    /// Create new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a data file, returning how many new players were added.
    ///
    /// The whole file is parsed before anything is inserted, so a failing
    /// load leaves the store untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let records = match read_records(path) {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error loading player data: {}", e);
                return Err(e);
            }
        };

        let total = records.len();
        let mut added = 0;
        for record in records {
            if self.insert(record) {
                added += 1;
            }
        }

        log::info!(
            "Loaded {} players from {} ({} already present)",
            added,
            path.display(),
            total - added
        );
        Ok(added)
    }

    /// Insert a record unless its name is already present.
    /// Returns `true` when the record was added.
    pub fn insert(&mut self, record: PlayerRecord) -> bool {
        if self.players.contains_key(&record.name) {
            return false;
        }
        self.order.push(record.name.clone());
        self.players.insert(record.name.clone(), record);
        true
    }

    /// Get player by name
    pub fn get(&self, name: &str) -> Result<&PlayerRecord> {
        if self.players.is_empty() {
            log::error!("Error: Player data not initialized. Check the data file.");
            return Err(BlitzError::Uninitialized);
        }
        self.players.get(name).ok_or_else(|| {
            let message = format!("Key {} not found in data. Check the data file.", name);
            log::error!("Error: {}", message);
            BlitzError::NotFound(message)
        })
    }

    /// Loaded names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Write one name per line, or a notice when nothing is loaded
    pub fn list_names(&self, out: &mut impl Write) -> io::Result<()> {
        if self.is_empty() {
            return writeln!(out, "No player data available. Load data first.");
        }
        for name in self.names() {
            writeln!(out, "{}", name)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

fn read_records(path: &Path) -> Result<Vec<PlayerRecord>> {
    let text = fs::read_to_string(path).map_err(|e| BlitzError::from_io(path, e))?;

    // Map (not HashMap) so data-file order survives for `names()`
    let raw: serde_json::Map<String, Value> =
        serde_json::from_str(&text).map_err(|e| BlitzError::from_json(path, e))?;

    raw.into_iter()
        .map(|(name, value)| {
            let fields: PlayerFields =
                serde_json::from_value(value).map_err(|e| BlitzError::Load {
                    path: path.to_path_buf(),
                    message: format!("player '{}': {}", name, e),
                })?;
            Ok(PlayerRecord::from_fields(name, fields))
        })
        .collect()
}
