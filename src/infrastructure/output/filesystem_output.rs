//! Filesystem-based output service implementation

use std::fs;
use std::path::Path;

use crate::generation::{Artifact, GenerationError, OutputService};

/// Output service that writes artifacts to the filesystem, replacing
/// existing files
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

impl OutputService for FileSystemOutputService {
    fn write_artifact(&self, artifact: &Artifact) -> Result<(), GenerationError> {
        if let Some(parent) = artifact.path.parent() {
            self.ensure_directory(parent)?;
        }

        fs::write(&artifact.path, &artifact.content).map_err(|e| {
            GenerationError::OutputError(format!(
                "Failed to write file {}: {}",
                artifact.path.display(),
                e
            ))
        })
    }

    fn ensure_directory(&self, path: &Path) -> Result<(), GenerationError> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        fs::create_dir_all(path).map_err(|e| {
            GenerationError::OutputError(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }
}

impl Default for FileSystemOutputService {
    fn default() -> Self {
        Self::new()
    }
}
