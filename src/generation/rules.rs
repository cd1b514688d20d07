//! Business rules for the generation domain

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::GenerationError;

// Module names become directory names, so they may not carry separators or dots.
static MODULE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("valid module name pattern"));

static ARTIFACT_KIND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("valid artifact kind pattern"));

/// Validates a module name before it is used as a path component
pub fn validate_module_name(name: &str) -> Result<(), GenerationError> {
    if name.is_empty() {
        return Err(GenerationError::ValidationError(
            "Module name cannot be empty".to_string(),
        ));
    }

    if !MODULE_NAME.is_match(name) {
        return Err(GenerationError::ValidationError(format!(
            "Module name '{name}' must start with a letter and contain only letters, digits, dashes and underscores"
        )));
    }

    Ok(())
}

/// Validates a custom artifact kind before it is used in template and file names
pub fn validate_artifact_kind(kind: &str) -> Result<(), GenerationError> {
    if !ARTIFACT_KIND.is_match(kind) {
        return Err(GenerationError::ValidationError(format!(
            "Artifact kind '{kind}' must start with a letter and contain only lowercase letters, digits, dashes and underscores"
        )));
    }

    Ok(())
}
