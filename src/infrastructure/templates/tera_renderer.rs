//! Tera-based template renderer implementation

use std::error::Error as _;
use std::fs;
use std::path::Path;

use serde_json::Value as JsonValue;
use tera::{Context, Tera};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::filters::register_filters;
use crate::generation::{GenerationError, TemplateRenderer};

const TEMPLATE_SUFFIX: &str = ".tera";

/// Renders templates loaded from a directory tree.
///
/// Template identifiers are paths relative to that directory with `/`
/// separators, e.g. `dto/create-dto.ts.tera`.
pub struct TeraTemplateRenderer {
    tera: Tera,
}

impl TeraTemplateRenderer {
    /// Load every `*.tera` file under `dir`.
    ///
    /// A missing directory yields a renderer without templates. A template
    /// that fails to parse is logged and skipped so that it only fails the
    /// artifacts that use it.
    pub fn from_dir(dir: &Path) -> Self {
        if !dir.is_dir() {
            warn!("Template directory {} not found", dir.display());
            return Self::from_templates(Vec::new());
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable template entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };
            let name = relative.to_string_lossy().replace('\\', "/");
            if !name.ends_with(TEMPLATE_SUFFIX) {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(content) => templates.push((name, content)),
                Err(e) => warn!("Skipping template {}: {}", name, e),
            }
        }

        let renderer = Self::from_templates(templates);
        let names = renderer.template_names();
        debug!(
            "Loaded {} template(s) from {}: {}",
            names.len(),
            dir.display(),
            names.join(", ")
        );
        renderer
    }

    /// Build a renderer from in-memory `(name, content)` pairs
    pub fn from_templates(templates: Vec<(String, String)>) -> Self {
        let mut tera = new_tera();
        match tera.add_raw_templates(templates.clone()) {
            Ok(()) => Self { tera },
            Err(e) => {
                debug!("Bulk template load failed, loading one by one: {}", describe(&e));
                Self {
                    tera: load_individually(templates),
                }
            }
        }
    }

    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .tera
            .get_template_names()
            .map(str::to_string)
            .collect();
        names.sort();
        names
    }
}

impl TemplateRenderer for TeraTemplateRenderer {
    fn render(&self, template: &str, data: &JsonValue) -> Result<String, GenerationError> {
        if !self.has_template(template) {
            return Err(GenerationError::TemplateNotFound(template.to_string()));
        }

        let context = Context::from_value(data.clone())
            .map_err(|e| GenerationError::render(template, describe(&e)))?;

        self.tera
            .render(template, &context)
            .map_err(|e| GenerationError::render(template, describe(&e)))
    }

    fn has_template(&self, template: &str) -> bool {
        self.tera.get_template_names().any(|name| name == template)
    }
}

fn new_tera() -> Tera {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![]);
    register_filters(&mut tera);
    tera
}

/// Accept templates one at a time, retrying the rejected ones while progress
/// is made so that a child template can follow its parent.
fn load_individually(templates: Vec<(String, String)>) -> Tera {
    let mut tera = new_tera();
    let mut accepted: Vec<(String, String)> = Vec::new();
    let mut pending = templates;
    let mut last_errors = Vec::new();

    loop {
        let before = pending.len();
        last_errors.clear();

        for (name, content) in std::mem::take(&mut pending) {
            let mut candidate = accepted.clone();
            candidate.push((name.clone(), content.clone()));

            let mut probe = new_tera();
            match probe.add_raw_templates(candidate) {
                Ok(()) => {
                    accepted.push((name, content));
                    tera = probe;
                }
                Err(e) => {
                    last_errors.push((name.clone(), describe(&e)));
                    pending.push((name, content));
                }
            }
        }

        if pending.is_empty() || pending.len() == before {
            break;
        }
    }

    for (name, error) in last_errors {
        warn!("Skipping template {}: {}", name, error);
    }
    tera
}

/// Tera nests the useful message in the error's source chain
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
