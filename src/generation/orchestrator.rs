//! Generation orchestration - coordinates the generation workflow

use std::path::Path;
use std::sync::Arc;

use crate::generation::{
    ArtifactWriter, BlueprintLoader, EmitReport, GenerationSummary, ModuleEmitter,
    OutputService, RelationResolver, Reporter, RootEmitter, TemplateRenderer,
};

/// Orchestrates one generation run: blueprint in, files out
pub struct GenerationOrchestrator {
    loader: Arc<dyn BlueprintLoader>,
    renderer: Arc<dyn TemplateRenderer>,
    output: Arc<dyn OutputService>,
    reporter: Arc<dyn Reporter>,
}

impl GenerationOrchestrator {
    pub fn new(
        loader: Arc<dyn BlueprintLoader>,
        renderer: Arc<dyn TemplateRenderer>,
        output: Arc<dyn OutputService>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            loader,
            renderer,
            output,
            reporter,
        }
    }

    /// Execute the generation workflow.
    ///
    /// Only a blueprint that cannot be loaded is returned as an error. Every
    /// later failure is reported, counted in the summary and skipped.
    pub fn run(
        &self,
        blueprint_path: &Path,
        output_root: &Path,
    ) -> crate::core::Result<GenerationSummary> {
        let reporter = self.reporter.as_ref();
        reporter.start(&format!(
            "Generating project from {}",
            blueprint_path.display()
        ));

        // 1. Load the blueprint
        let mut blueprint = self.loader.load(blueprint_path)?;
        reporter.debug(&format!(
            "Loaded blueprint '{}' with {} module(s)",
            blueprint.root.name,
            blueprint.modules.len()
        ));

        for names in blueprint.path_collisions() {
            let spellings: Vec<String> = names.iter().map(|name| format!("'{name}'")).collect();
            reporter.warning(&format!(
                "Modules {} share the output directory src/{}; later definitions overwrite earlier files",
                spellings.join(", "),
                names[0].to_lowercase()
            ));
        }

        let mut summary = GenerationSummary {
            root_name: blueprint.root.name.clone(),
            ..Default::default()
        };

        if blueprint.modules.is_empty() {
            reporter.warning("Blueprint defines no modules; nothing to generate");
            reporter.end("Generation finished without output");
            return Ok(summary);
        }

        // 2. Resolve relations and write inverse fields back into the modules
        let relations = RelationResolver::new(reporter).resolve(&mut blueprint.modules);

        // 3. Root files first, then every module in declaration order
        let writer = ArtifactWriter::new(self.renderer.as_ref(), self.output.as_ref(), reporter);
        let mut report = EmitReport::default();
        report.merge(RootEmitter::new(&writer, output_root).emit(&blueprint.root, &blueprint.modules));

        let module_emitter = ModuleEmitter::new(&writer, output_root);
        for module in &blueprint.modules {
            report.merge(module_emitter.emit(module, &relations));
        }

        // 4. Summarize
        summary.module_names = blueprint.module_names();
        summary.artifacts_written = report.written.len();
        summary.artifacts_failed = report.failed.len();
        self.report_summary(&summary);

        Ok(summary)
    }

    fn report_summary(&self, summary: &GenerationSummary) {
        let reporter = self.reporter.as_ref();

        reporter.info(&format!("Root module: {}", summary.root_name));
        reporter.info(&format!("Sub-modules: {}", summary.module_count()));
        for name in &summary.module_names {
            reporter.info(&format!("  • {name}"));
        }
        if summary.artifacts_failed > 0 {
            reporter.warning(&format!(
                "{} artifact(s) could not be generated; see the errors above",
                summary.artifacts_failed
            ));
        }
        reporter.end(&format!(
            "Generation complete: {} file(s) written",
            summary.artifacts_written
        ));
    }
}
