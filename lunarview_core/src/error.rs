//! Error types for the LunarView pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while sampling, loading or playing a trajectory.
#[derive(Debug, Error)]
pub enum LunarError {
    /// Input table does not exist
    #[error("The file {} was not found.", .path.display())]
    InputNotFound { path: PathBuf },

    /// A retained field could not be interpreted as a number
    #[error("could not convert string to float: '{value}' (row {row}, column {column})")]
    ValueParse {
        row: usize,
        column: usize,
        value: String,
    },

    /// A trajectory row did not hold exactly one (x, y) pair
    #[error("expected 2 fields in row {row}, found {found}")]
    FieldCount { row: usize, found: usize },

    /// Trajectory had no points to animate
    #[error("no trajectory points to animate")]
    EmptyTrajectory,

    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// CSV reader/writer failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying file operation failed
    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    /// Config file serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the crate.
pub type Result<T, E = LunarError> = std::result::Result<T, E>;

impl LunarError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Maps a failed `File::open` to `InputNotFound` when the path is missing.
    pub fn from_open(path: &Path, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::InputNotFound {
                path: path.to_path_buf(),
            }
        } else {
            Self::Io(err)
        }
    }
}
