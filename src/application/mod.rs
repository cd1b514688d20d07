//! Application layer - wires configuration and adapters into the generation workflow

pub mod commands;
pub mod errors;
pub mod generate_project;

pub use commands::*;
pub use errors::*;
pub use generate_project::*;
