//! Renders and writes single artifacts with failure isolation

use crate::generation::{
    Artifact, ArtifactSpec, EmitReport, GenerationError, OutputService, RenderContext, Reporter,
    TemplateRenderer,
};

/// Shared render-then-write step used by both emitters.
///
/// A failure is reported with the artifact label and owner and recorded in
/// the [`EmitReport`]; it is never returned to the caller.
pub struct ArtifactWriter<'a> {
    renderer: &'a dyn TemplateRenderer,
    output: &'a dyn OutputService,
    reporter: &'a dyn Reporter,
}

impl<'a> ArtifactWriter<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        output: &'a dyn OutputService,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            renderer,
            output,
            reporter,
        }
    }

    pub fn reporter(&self) -> &'a dyn Reporter {
        self.reporter
    }

    pub fn output(&self) -> &'a dyn OutputService {
        self.output
    }

    /// Render `spec` with `context` and write it; `owner` names the module
    /// (or the root) in failure messages
    pub fn write(
        &self,
        owner: &str,
        spec: &ArtifactSpec,
        context: &RenderContext,
        report: &mut EmitReport,
    ) {
        match self.try_write(spec, context) {
            Ok(()) => {
                self.reporter
                    .success(&format!("Generated {}", spec.path.display()));
                report.written.push(spec.path.clone());
            }
            Err(e) => {
                self.reporter.error(&format!(
                    "Failed to generate {} for {}: {}",
                    spec.label, owner, e
                ));
                report.failed.push(spec.label.clone());
            }
        }
    }

    /// Record a failure that happened before rendering could start
    pub fn fail(&self, owner: &str, label: &str, error: &GenerationError, report: &mut EmitReport) {
        self.reporter
            .error(&format!("Failed to generate {label} for {owner}: {error}"));
        report.failed.push(label.to_string());
    }

    fn try_write(&self, spec: &ArtifactSpec, context: &RenderContext) -> Result<(), GenerationError> {
        let content = self.renderer.render(&spec.template, &context.to_value())?;
        self.output.write_artifact(&Artifact {
            path: spec.path.clone(),
            content,
        })
    }
}
