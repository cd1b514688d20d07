//! Data Transfer Objects for application layer

use std::path::PathBuf;

use serde::Serialize;

use crate::application::ValidationError;
use crate::core::Config;
use crate::generation::GenerationSummary;

/// Request to generate a project from a blueprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateProjectRequest {
    pub blueprint_path: PathBuf,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl GenerateProjectRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.blueprint_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingPath("blueprint"));
        }
        if self.template_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingPath("template directory"));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingPath("output directory"));
        }
        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(ValidationError::OutputNotDirectory(
                self.output_dir.display().to_string(),
            ));
        }
        Ok(())
    }
}

impl From<Config> for GenerateProjectRequest {
    fn from(config: Config) -> Self {
        Self {
            blueprint_path: config.blueprint_path,
            template_dir: config.template_dir,
            output_dir: config.output_dir,
        }
    }
}

/// Response from project generation
#[derive(Debug, Clone, Serialize)]
pub struct GenerateProjectResponse {
    pub output_path: PathBuf,
    pub summary: GenerationSummary,
}
