//! Application layer error types

use thiserror::Error;

/// Application layer errors
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Core(#[from] crate::core::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),
}

/// Validation errors for requests
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required path: {0}")]
    MissingPath(&'static str),

    #[error("Output directory {0} exists and is not a directory")]
    OutputNotDirectory(String),
}
