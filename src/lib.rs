//! nestgen - NestJS scaffolding from a YAML blueprint
//!
//! A blueprint names the application and lists entity modules with their
//! fields, relations and the artifacts to generate. [`application`] wires the
//! file-based adapters in [`infrastructure`] into the
//! [`generation::GenerationOrchestrator`], which renders Tera templates into
//! a NestJS source tree.

pub mod application;
pub mod blueprint;
pub mod core;
pub mod generation;
pub mod infrastructure;
