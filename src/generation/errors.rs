//! Error types for the generation domain
//!
//! These errors describe a single artifact or module going wrong. Emitters
//! report them and move on; none of them aborts a run.

use thiserror::Error;

/// Errors that can occur while producing one artifact
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Failed to render template '{template}': {message}")]
    RenderError { template: String, message: String },

    #[error("Output error: {0}")]
    OutputError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn render<T: Into<String>, M: Into<String>>(template: T, message: M) -> Self {
        Self::RenderError {
            template: template.into(),
            message: message.into(),
        }
    }
}
