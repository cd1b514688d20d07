//! File-based blueprint loader
//!
//! `.json` files are parsed as JSON; everything else is treated as YAML.

use std::fs;
use std::path::Path;

use crate::blueprint::Blueprint;
use crate::core::{Error, Result};
use crate::generation::BlueprintLoader;

/// Loads blueprints from local files
pub struct FileBlueprintLoader;

impl FileBlueprintLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse blueprint text, choosing the format from `source`'s extension
    pub fn parse(source: &Path, content: &str) -> Result<Blueprint> {
        let is_json = source
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed: std::result::Result<Blueprint, String> = if is_json {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| Error::blueprint(source, message))
    }
}

impl BlueprintLoader for FileBlueprintLoader {
    fn load(&self, source: &Path) -> Result<Blueprint> {
        let content =
            fs::read_to_string(source).map_err(|e| Error::blueprint(source, e.to_string()))?;

        tracing::debug!("Read blueprint {} ({} bytes)", source.display(), content.len());
        Self::parse(source, &content)
    }
}

impl Default for FileBlueprintLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::ArtifactKind;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("Failed to write blueprint");
        path
    }

    #[test]
    fn test_load_yaml_blueprint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write(
            &dir,
            "blueprint.yaml",
            r#"
root:
  name: Shop
  database: { type: sqlite, database: shop.db }
modules:
  - name: Product
    authProtected: true
    generate: [module, Controller, dto]
    entity:
      fields:
        - { name: price, type: number, required: true }
"#,
        );

        let blueprint = FileBlueprintLoader::new().load(&path).unwrap();

        assert_eq!(blueprint.root.name, "Shop");
        assert!(blueprint.root.has_storage_backend());
        let product = &blueprint.modules[0];
        assert!(product.auth_protected);
        assert_eq!(
            product.generate,
            vec![ArtifactKind::Module, ArtifactKind::Controller, ArtifactKind::Dto]
        );
        assert_eq!(product.entity.fields[0].type_tag.as_deref(), Some("number"));
    }

    #[test]
    fn test_load_json_blueprint() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = write(
            &dir,
            "blueprint.json",
            r#"{"modules": [{"name": "Tag", "generate": ["service"]}]}"#,
        );

        let blueprint = FileBlueprintLoader::new().load(&path).unwrap();

        assert_eq!(blueprint.root.name, "App");
        assert_eq!(blueprint.module_names(), vec!["Tag"]);
    }

    #[test]
    fn test_missing_file_is_blueprint_error() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("absent.yaml");

        let error = FileBlueprintLoader::new().load(&path).unwrap_err();

        assert!(matches!(error, Error::Blueprint { .. }));
        assert!(error.to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_malformed_yaml_is_blueprint_error() {
        let error =
            FileBlueprintLoader::parse(Path::new("bad.yml"), "modules: [ { name: A ").unwrap_err();

        assert!(error.to_string().starts_with("Failed to load blueprint bad.yml"));
    }

    #[test]
    fn test_module_without_name_is_rejected() {
        let error = FileBlueprintLoader::parse(
            Path::new("blueprint.yaml"),
            "modules:\n  - generate: [service]\n",
        )
        .unwrap_err();

        assert!(error.to_string().contains("name"), "{error}");
    }
}
