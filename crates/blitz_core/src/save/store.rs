use super::format::TeamSave;
use crate::error::{BlitzError, Result};

use std::fs::{self, rename, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Extension given to every save file
pub const SAVE_EXTENSION: &str = "json";

/// Named team saves kept as JSON files in one directory
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for a save name; `.json` is appended unless already present.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        log_failure("resolving save name", self.resolve(name))
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        let name = name.trim();
        let invalid = name.is_empty()
            || name.contains(['/', '\\'])
            || name == "."
            || name.starts_with("..");
        if invalid {
            return Err(BlitzError::Io {
                path: self.dir.join(name),
                source: io::Error::new(io::ErrorKind::InvalidInput, "invalid save name"),
            });
        }

        let suffix = format!(".{SAVE_EXTENSION}");
        if name.ends_with(&suffix) {
            Ok(self.dir.join(name))
        } else {
            Ok(self.dir.join(format!("{name}{suffix}")))
        }
    }

    pub fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.exists())
    }

    /// Write a save, creating the save directory on first use.
    pub fn write(&self, name: &str, save: &TeamSave) -> Result<PathBuf> {
        let path = log_failure("saving team", self.write_file(name, save))?;
        log::info!("Team saved to {} ({} players)", path.display(), save.players.len());
        Ok(path)
    }

    fn write_file(&self, name: &str, save: &TeamSave) -> Result<PathBuf> {
        let path = self.resolve(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| BlitzError::from_io(&self.dir, e))?;

        let json = save.to_json_pretty()?;

        // Write to temp file, then rename over the target
        let temp_path = path.with_extension("tmp");
        if let Err(e) = replace_file(&temp_path, &path, json.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(path)
    }

    pub fn read(&self, name: &str) -> Result<TeamSave> {
        log_failure("reading save", self.read_file(name))
    }

    fn read_file(&self, name: &str) -> Result<TeamSave> {
        let path = self.resolve(name)?;
        let text = fs::read_to_string(&path).map_err(|e| BlitzError::from_io(&path, e))?;
        let save = serde_json::from_str(&text).map_err(|e| BlitzError::from_json(&path, e))?;

        log::debug!("Loaded {} bytes from {:?}", text.len(), path);
        Ok(save)
    }

    /// Names of existing saves, sorted. Empty when the directory does not exist yet.
    pub fn list(&self) -> Result<Vec<String>> {
        log_failure("listing saves", self.list_files())
    }

    fn list_files(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| BlitzError::from_io(&self.dir, e))?;
        let mut names = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| BlitzError::from_io(&self.dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == SAVE_EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

fn replace_file(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    {
        let mut file = File::create(temp_path).map_err(|e| BlitzError::from_io(temp_path, e))?;
        file.write_all(bytes)
            .and_then(|_| file.flush())
            .map_err(|e| BlitzError::from_io(temp_path, e))?;
    }
    rename(temp_path, path).map_err(|e| BlitzError::from_io(path, e))
}

fn log_failure<T>(action: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        log::error!("Error {}: {}", action, e);
    }
    result
}
