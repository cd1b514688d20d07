//! Use case for generating a NestJS project from a blueprint

use std::sync::Arc;

use crate::application::{ApplicationError, GenerateProjectRequest, GenerateProjectResponse};
use crate::generation::{
    BlueprintLoader, GenerationOrchestrator, OutputService, Reporter, TemplateRenderer,
};
use crate::infrastructure::{FileBlueprintLoader, FileSystemOutputService, TeraTemplateRenderer};

/// Use case for generating a project
pub struct GenerateProjectUseCase {
    loader: Arc<dyn BlueprintLoader>,
    output: Arc<dyn OutputService>,
    reporter: Arc<dyn Reporter>,
}

impl GenerateProjectUseCase {
    pub fn new(
        loader: Arc<dyn BlueprintLoader>,
        output: Arc<dyn OutputService>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            loader,
            output,
            reporter,
        }
    }

    /// File loader and filesystem output
    pub fn with_filesystem(reporter: Arc<dyn Reporter>) -> Self {
        Self::new(
            Arc::new(FileBlueprintLoader::new()),
            Arc::new(FileSystemOutputService::new()),
            reporter,
        )
    }

    pub fn execute(
        &self,
        request: GenerateProjectRequest,
    ) -> Result<GenerateProjectResponse, ApplicationError> {
        // 1. Validate request
        request.validate()?;

        // 2. Load templates; the renderer is tied to the requested directory
        let renderer: Arc<dyn TemplateRenderer> =
            Arc::new(TeraTemplateRenderer::from_dir(&request.template_dir));

        // 3. Run the generation workflow
        let orchestrator = GenerationOrchestrator::new(
            self.loader.clone(),
            renderer,
            self.output.clone(),
            self.reporter.clone(),
        );
        let summary = orchestrator.run(&request.blueprint_path, &request.output_dir)?;

        Ok(GenerateProjectResponse {
            output_path: request.output_dir,
            summary,
        })
    }
}
