use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the data store, roster and save store.
#[derive(Error, Debug)]
pub enum BlitzError {
    /// Missing file, missing player key or missing level key
    #[error("{0}")]
    NotFound(String),

    #[error("An error occurred while reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The file '{path}' contains invalid JSON. Check for formatting errors. ({source})")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Catch-all for records that parse as JSON but do not fit the schema
    #[error("Unexpected error while loading '{path}': {message}")]
    Load { path: PathBuf, message: String },

    #[error("Player data not initialized. Check the data file.")]
    Uninitialized,

    #[error("Stats for {name} are unavailable at level {level}.")]
    StatsUnavailable { name: String, level: u32 },

    #[error("{name} is already on the team.")]
    Duplicate { name: String },

    #[error("Attempted to release {name} from team, but {name} was not on the team.")]
    NotOnTeam { name: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BlitzError {
    /// Classify an I/O failure on `path`; a missing file becomes `NotFound`.
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            BlitzError::NotFound(format!(
                "The file '{}' was not found. Ensure it exists and try again.",
                path.display()
            ))
        } else {
            BlitzError::Io { path, source }
        }
    }

    /// Classify a JSON failure on `path`.
    ///
    /// Syntax and truncation problems are `Format`; well-formed JSON that does
    /// not match the expected shape is `Load`.
    pub fn from_json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let path = path.into();
        match source.classify() {
            Category::Syntax | Category::Eof => BlitzError::Format { path, source },
            Category::Io => BlitzError::Io { path, source: source.into() },
            Category::Data => BlitzError::Load { path, message: source.to_string() },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BlitzError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, BlitzError>;
