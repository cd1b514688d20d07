//! Run configuration: where the blueprint, templates and output live

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{Error, Result};

/// Blueprint read when no path is given on the command line
pub const DEFAULT_BLUEPRINT_FILE: &str = "blueprint.yaml";
/// Template directory used when `NESTGEN_TEMPLATE_DIR` is unset
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";
/// Output root used when `NESTGEN_OUTPUT_DIR` is unset
pub const DEFAULT_OUTPUT_DIR: &str = "nest_project";

pub const TEMPLATE_DIR_ENV: &str = "NESTGEN_TEMPLATE_DIR";
pub const OUTPUT_DIR_ENV: &str = "NESTGEN_OUTPUT_DIR";

/// Trait for reading configuration overrides, allowing dependency injection for testing
pub trait ConfigReader {
    fn template_dir(&self) -> Option<String>;
    fn output_dir(&self) -> Option<String>;
}

/// Production implementation that reads from environment variables
pub struct EnvConfigReader;

impl ConfigReader for EnvConfigReader {
    fn template_dir(&self) -> Option<String> {
        std::env::var(TEMPLATE_DIR_ENV).ok()
    }

    fn output_dir(&self) -> Option<String> {
        std::env::var(OUTPUT_DIR_ENV).ok()
    }
}

/// Mock implementation for testing with controlled values
#[cfg(test)]
pub struct MockConfigReader {
    template_dir: Option<String>,
    output_dir: Option<String>,
}

#[cfg(test)]
impl MockConfigReader {
    pub fn new(template_dir: Option<&str>, output_dir: Option<&str>) -> Self {
        Self {
            template_dir: template_dir.map(str::to_string),
            output_dir: output_dir.map(str::to_string),
        }
    }
}

#[cfg(test)]
impl ConfigReader for MockConfigReader {
    fn template_dir(&self) -> Option<String> {
        self.template_dir.clone()
    }

    fn output_dir(&self) -> Option<String> {
        self.output_dir.clone()
    }
}

/// Resolved settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub blueprint_path: PathBuf,
    pub template_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration from the CLI argument and the environment
    pub fn resolve(blueprint_path: Option<&Path>) -> Result<Self> {
        Self::resolve_with_reader(blueprint_path, &EnvConfigReader)
    }

    /// Resolve the configuration with a custom reader (for testing)
    pub fn resolve_with_reader(
        blueprint_path: Option<&Path>,
        reader: &dyn ConfigReader,
    ) -> Result<Self> {
        let blueprint_path = blueprint_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BLUEPRINT_FILE));

        let template_dir = non_empty_override(reader.template_dir(), TEMPLATE_DIR_ENV)?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_DIR));
        let output_dir = non_empty_override(reader.output_dir(), OUTPUT_DIR_ENV)?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        debug!(
            blueprint = %blueprint_path.display(),
            templates = %template_dir.display(),
            output = %output_dir.display(),
            "Resolved configuration"
        );

        Ok(Self {
            blueprint_path,
            template_dir,
            output_dir,
        })
    }
}

fn non_empty_override(value: Option<String>, name: &str) -> Result<Option<PathBuf>> {
    match value {
        Some(v) if v.trim().is_empty() => Err(Error::config(format!("{name} is set but empty"))),
        Some(v) => Ok(Some(PathBuf::from(v))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let reader = MockConfigReader::new(None, None);
        let config = Config::resolve_with_reader(None, &reader).unwrap();

        assert_eq!(config.blueprint_path, PathBuf::from("blueprint.yaml"));
        assert_eq!(config.template_dir, PathBuf::from("templates"));
        assert_eq!(config.output_dir, PathBuf::from("nest_project"));
    }

    #[test]
    fn test_cli_path_and_env_overrides() {
        let reader = MockConfigReader::new(Some("/srv/templates"), Some("out"));
        let config =
            Config::resolve_with_reader(Some(Path::new("shop.yml")), &reader).unwrap();

        assert_eq!(config.blueprint_path, PathBuf::from("shop.yml"));
        assert_eq!(config.template_dir, PathBuf::from("/srv/templates"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_empty_override_is_rejected() {
        let reader = MockConfigReader::new(None, Some("  "));
        let err = Config::resolve_with_reader(None, &reader).unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains(OUTPUT_DIR_ENV));
    }
}
