//! Port interfaces for the generation domain

use std::path::Path;

use serde_json::Value as JsonValue;

use crate::blueprint::Blueprint;
use crate::generation::{Artifact, GenerationError};

/// Loads a blueprint from its declarative source
pub trait BlueprintLoader: Send + Sync {
    /// Read and parse the blueprint; failure here is the one fatal error of a run
    fn load(&self, source: &Path) -> crate::core::Result<Blueprint>;
}

/// Renders a named template with a data mapping
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, data: &JsonValue) -> Result<String, GenerationError>;

    fn has_template(&self, template: &str) -> bool;
}

/// Writes rendered artifacts to their destination
pub trait OutputService: Send + Sync {
    /// Write one artifact, replacing any existing file
    fn write_artifact(&self, artifact: &Artifact) -> Result<(), GenerationError>;

    /// Ensure a directory exists
    fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError>;
}
