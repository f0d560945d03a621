//! Error types and result alias for the hotkeys crate.

use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The combo string does not parse as a key combination.
    #[error("invalid key combination `{combo}`: {message}")]
    InvalidCombo {
        /// The offending combo string.
        combo: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The OS refused the registration, typically because another process
    /// already claimed the combo.
    #[error("cannot register `{combo}`: {message}")]
    Register {
        /// The combo that was rejected.
        combo: String,
        /// OS diagnostic.
        message: String,
    },
    /// No active registration exists for the provided id.
    #[error("no active registration with id {0}")]
    UnknownId(u32),
    /// The hotkey backend could not be initialized or failed internally.
    #[error("hotkey backend error: {0}")]
    Backend(String),
}
