//! In-memory ports shared by the generation unit tests

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde_json::Value as JsonValue;

use crate::blueprint::Blueprint;
use crate::generation::{
    Artifact, BlueprintLoader, GenerationError, OutputService, Reporter, TemplateRenderer,
};

/// Reporter that keeps every message with its severity
#[derive(Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: &'static str, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }

    pub fn messages(&self, level: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages("warning")
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages("error")
    }
}

impl Reporter for RecordingReporter {
    fn start(&self, message: &str) {
        self.push("start", message);
    }
    fn end(&self, message: &str) {
        self.push("end", message);
    }
    fn success(&self, message: &str) {
        self.push("success", message);
    }
    fn debug(&self, message: &str) {
        self.push("debug", message);
    }
    fn info(&self, message: &str) {
        self.push("info", message);
    }
    fn warning(&self, message: &str) {
        self.push("warning", message);
    }
    fn error(&self, message: &str) {
        self.push("error", message);
    }
}

/// Renderer that knows a fixed set of template names and echoes the data
pub struct MemoryRenderer {
    templates: BTreeSet<String>,
    broken: BTreeSet<String>,
}

impl MemoryRenderer {
    pub fn with_templates<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            templates: names.into_iter().map(str::to_string).collect(),
            broken: BTreeSet::new(),
        }
    }

    /// Mark a known template as failing at render time
    pub fn broken(mut self, name: &str) -> Self {
        self.broken.insert(name.to_string());
        self
    }
}

impl TemplateRenderer for MemoryRenderer {
    fn render(&self, template: &str, data: &JsonValue) -> Result<String, GenerationError> {
        if !self.templates.contains(template) {
            return Err(GenerationError::TemplateNotFound(template.to_string()));
        }
        if self.broken.contains(template) {
            return Err(GenerationError::render(template, "boom"));
        }
        Ok(format!("// {template}\n{data}"))
    }

    fn has_template(&self, template: &str) -> bool {
        self.templates.contains(template)
    }
}

/// Output service that stores files in a map
#[derive(Default)]
pub struct MemoryOutput {
    files: Mutex<BTreeMap<PathBuf, String>>,
    read_only: BTreeSet<PathBuf>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse writes to this exact path
    pub fn read_only(mut self, path: impl Into<PathBuf>) -> Self {
        self.read_only.insert(path.into());
        self
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub fn content(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }
}

impl OutputService for MemoryOutput {
    fn write_artifact(&self, artifact: &Artifact) -> Result<(), GenerationError> {
        if self.read_only.contains(&artifact.path) {
            return Err(GenerationError::OutputError(format!(
                "Failed to write file {}: read-only",
                artifact.path.display()
            )));
        }
        self.files
            .lock()
            .unwrap()
            .insert(artifact.path.clone(), artifact.content.clone());
        Ok(())
    }

    fn ensure_directory(&self, _path: &Path) -> Result<(), GenerationError> {
        Ok(())
    }
}

/// Loader that parses a YAML string regardless of the path
pub struct StaticLoader(pub &'static str);

impl BlueprintLoader for StaticLoader {
    fn load(&self, source: &Path) -> crate::core::Result<Blueprint> {
        serde_yaml::from_str(self.0)
            .map_err(|e| crate::core::Error::blueprint(source, e.to_string()))
    }
}

/// Parse a blueprint fixture
pub fn blueprint(yaml: &str) -> Blueprint {
    serde_yaml::from_str(yaml).unwrap()
}
