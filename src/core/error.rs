//! Error handling for the nestgen code generation library.
//!
//! This module defines the main error type `Error` used for the fatal paths
//! of a run (reading configuration and loading the blueprint), along with a
//! convenient `Result` type alias. Per-artifact failures use
//! [`GenerationError`](crate::generation::GenerationError) instead and never
//! abort a run.
//!
//! # Examples
//!
//! ```
//! use nestgen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("output directory is not writable"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Result type for nestgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for nestgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// The blueprint could not be read or parsed
    #[error("Failed to load blueprint {}: {message}", path.display())]
    Blueprint { path: PathBuf, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new blueprint loading error
    pub fn blueprint<P: Into<PathBuf>, S: Into<String>>(path: P, msg: S) -> Self {
        Self::Blueprint {
            path: path.into(),
            message: msg.into(),
        }
    }
}
