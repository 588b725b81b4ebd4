//! Data file and save directory locations.
//!
//! Resolution order: explicit overrides (CLI flags), then environment
//! variables, then paths relative to the working directory.

use std::env;
use std::path::PathBuf;

/// Env var overriding the player data file
pub const DATA_PATH_ENV: &str = "BLITZ_DATA_PATH";

/// Env var overriding the save directory
pub const SAVE_DIR_ENV: &str = "BLITZ_SAVE_DIR";

/// Default data file, relative to the application root
pub const DEFAULT_DATA_REL_PATH: &str = "data/blitzball_players.json";

/// Default save directory, relative to the application root
pub const DEFAULT_SAVE_DIR: &str = "saves";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub save_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_REL_PATH),
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

impl AppConfig {
    /// Resolve from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve using `lookup` in place of `std::env::var`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };

        let defaults = Self::default();
        Self {
            data_path: read(DATA_PATH_ENV).unwrap_or(defaults.data_path),
            save_dir: read(SAVE_DIR_ENV).unwrap_or(defaults.save_dir),
        }
    }

    /// Apply explicit overrides on top of the resolved values
    pub fn with_overrides(mut self, data_path: Option<PathBuf>, save_dir: Option<PathBuf>) -> Self {
        if let Some(path) = data_path {
            self.data_path = path;
        }
        if let Some(dir) = save_dir {
            self.save_dir = dir;
        }
        self
    }
}
