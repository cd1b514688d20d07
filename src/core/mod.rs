//! Crate-wide building blocks: errors, run configuration and naming helpers.

pub mod config;
pub mod error;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
