//! Template rendering backed by Tera

pub mod filters;
pub mod tera_renderer;

pub use tera_renderer::*;
