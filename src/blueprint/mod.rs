//! Blueprint domain - the declarative description of the application to scaffold
//!
//! A blueprint has root settings (application name, optional storage backend)
//! and an ordered list of entity modules, each with the artifacts to generate
//! and an entity made of fields and relations to other modules.

pub mod types;

pub use types::*;
