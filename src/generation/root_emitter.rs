//! Emits the application-level files under `<output>/src`

use std::path::{Path, PathBuf};

use crate::blueprint::{ModuleDefinition, RootSettings};
use crate::generation::{ArtifactSpec, ArtifactWriter, EmitReport, RenderContext, SOURCE_DIR};

const ROOT_TEMPLATE_DIR: &str = "root";

/// Root files in emission order; the flag marks files that need a storage backend
const ROOT_FILES: [(&str, bool); 5] = [
    ("app.module", false),
    ("main", false),
    ("database.config", true),
    ("app.controller", false),
    ("app.service", false),
];

pub struct RootEmitter<'a> {
    writer: &'a ArtifactWriter<'a>,
    src_dir: PathBuf,
}

impl<'a> RootEmitter<'a> {
    pub fn new(writer: &'a ArtifactWriter<'a>, output_root: &Path) -> Self {
        Self {
            writer,
            src_dir: output_root.join(SOURCE_DIR),
        }
    }

    /// Root artifacts for these settings, in the order they are written.
    /// The database configuration is only planned when a backend is declared.
    pub fn plan(&self, root: &RootSettings) -> Vec<ArtifactSpec> {
        ROOT_FILES
            .iter()
            .filter(|(_, needs_storage)| !needs_storage || root.has_storage_backend())
            .map(|(stem, _)| {
                let file = format!("{stem}.ts");
                ArtifactSpec::new(
                    file.clone(),
                    format!("{ROOT_TEMPLATE_DIR}/{stem}.ts.tera"),
                    self.src_dir.join(file),
                )
            })
            .collect()
    }

    pub fn emit(&self, root: &RootSettings, modules: &[ModuleDefinition]) -> EmitReport {
        let reporter = self.writer.reporter();
        let owner = format!("root module {}", root.name);
        let plan = self.plan(root);
        let mut report = EmitReport::default();

        reporter.start(&format!("Generating root files for {}", root.name));

        match RenderContext::for_root(root, modules) {
            Ok(context) => {
                if let Err(e) = self.writer.output().ensure_directory(&self.src_dir) {
                    reporter.warning(&format!("Could not prepare directory for {owner}: {e}"));
                }
                for spec in &plan {
                    self.writer.write(&owner, spec, &context, &mut report);
                }
            }
            Err(e) => {
                for spec in &plan {
                    self.writer.fail(&owner, &spec.label, &e, &mut report);
                }
            }
        }

        reporter.end(&format!(
            "Generated root files for {} ({} written, {} failed)",
            root.name,
            report.written.len(),
            report.failed.len()
        ));
        report
    }
}
