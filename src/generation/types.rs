//! Core types for the generation domain

use std::path::PathBuf;

use serde::Serialize;

/// Target type used for any tag the type mapper does not recognise
pub const FALLBACK_TYPE: &str = "any";

/// Source directory under the output root; module directories live inside it
pub const SOURCE_DIR: &str = "src";

/// Extension shared by every template file
pub const TEMPLATE_EXTENSION: &str = ".ts.tera";

/// Maps an abstract field type tag to the TypeScript type emitted for it.
///
/// Total and pure: unknown tags map to [`FALLBACK_TYPE`].
///
/// # Examples
/// ```
/// use nestgen::generation::map_type;
///
/// assert_eq!(map_type("number"), "number");
/// assert_eq!(map_type("enum"), "string");
/// assert_eq!(map_type("date"), "any");
/// ```
pub fn map_type(tag: &str) -> &'static str {
    match tag {
        "string" => "string",
        "number" => "number",
        "boolean" => "boolean",
        "enum" => "string",
        _ => FALLBACK_TYPE,
    }
}

/// A file the generator intends to produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSpec {
    /// Human readable name used in progress messages, e.g. `create DTO`
    pub label: String,
    /// Template identifier relative to the template directory
    pub template: String,
    pub path: PathBuf,
}

impl ArtifactSpec {
    pub fn new(label: impl Into<String>, template: impl Into<String>, path: PathBuf) -> Self {
        Self {
            label: label.into(),
            template: template.into(),
            path,
        }
    }
}

/// Rendered file content ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

/// Outcome of one emitter invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub written: Vec<PathBuf>,
    /// Labels of the artifacts that could not be produced
    pub failed: Vec<String>,
}

impl EmitReport {
    pub fn merge(&mut self, other: EmitReport) {
        self.written.extend(other.written);
        self.failed.extend(other.failed);
    }
}

/// What a completed run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub root_name: String,
    pub module_names: Vec<String>,
    pub artifacts_written: usize,
    pub artifacts_failed: usize,
}

impl GenerationSummary {
    pub fn module_count(&self) -> usize {
        self.module_names.len()
    }
}
