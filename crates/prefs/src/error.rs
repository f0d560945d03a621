//! Error types for preference persistence.

use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors produced while persisting preferences.
///
/// Read-side problems never surface here: a broken file on disk is recovered
/// by reconciling against the defaults.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem failure while writing the preferences file.
    #[error("preferences I/O error: {0}")]
    Io(#[from] io::Error),
    /// The in-memory document could not be serialized.
    #[error("preferences serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
