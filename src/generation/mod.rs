//! Generation domain module - turns a blueprint into NestJS source files
//!
//! The orchestrator loads a blueprint through a [`BlueprintLoader`], resolves
//! the relations between modules, then drives the root and module emitters.
//! Emitters render through a [`TemplateRenderer`] and write through an
//! [`OutputService`]; both are ports implemented in `infrastructure`.

pub mod context;
pub mod errors;
pub mod module_emitter;
pub mod orchestrator;
pub mod relations;
pub mod reporter;
pub mod root_emitter;
pub mod rules;
pub mod traits;
pub mod types;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use context::*;
pub use errors::*;
pub use module_emitter::*;
pub use orchestrator::*;
pub use relations::*;
pub use reporter::*;
pub use root_emitter::*;
pub use traits::*;
pub use types::*;
pub use writer::*;
