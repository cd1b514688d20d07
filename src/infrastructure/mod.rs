//! Infrastructure layer - concrete implementations of domain ports

pub mod blueprint;
pub mod output;
pub mod templates;

pub use blueprint::*;
pub use output::*;
pub use templates::*;
