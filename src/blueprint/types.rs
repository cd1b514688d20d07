//! Serde model of the blueprint document

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use crate::core::utils::to_kebab_case;

/// Application name used when `root.name` is absent
pub const DEFAULT_APP_NAME: &str = "App";

/// The whole input document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Blueprint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub root: RootSettings,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modules: Vec<ModuleDefinition>,
}

impl Blueprint {
    /// Module names in declaration order
    pub fn module_names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name.clone()).collect()
    }

    /// Groups of modules whose names map to the same output directory.
    ///
    /// Paths are lowercased, so `User` and `user` collide just like two
    /// `User` entries. Each group lists the names in declaration order;
    /// groups are ordered by their first member.
    pub fn path_collisions(&self) -> Vec<Vec<String>> {
        let mut groups: Vec<(String, Vec<String>)> = Vec::new();
        for module in &self.modules {
            let path = module.path_name();
            match groups.iter_mut().find(|(existing, _)| *existing == path) {
                Some((_, names)) => names.push(module.name.clone()),
                None => groups.push((path, vec![module.name.clone()])),
            }
        }
        groups
            .into_iter()
            .map(|(_, names)| names)
            .filter(|names| names.len() > 1)
            .collect()
    }
}

/// Application-wide settings under the `root` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Storage backend settings; the storage configuration artifact is only
    /// produced when this is present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<JsonValue>,
    /// Any other root keys, passed through to the root templates
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl RootSettings {
    pub fn has_storage_backend(&self) -> bool {
        self.database.is_some()
    }
}

impl Default for RootSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            database: None,
            extra: BTreeMap::new(),
        }
    }
}

fn default_app_name() -> String {
    DEFAULT_APP_NAME.to_string()
}

/// One entity module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDefinition {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub generate: Vec<ArtifactKind>,
    #[serde(default)]
    pub auth_protected: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entity: EntityDescriptor,
}

impl ModuleDefinition {
    /// Lowercased name used for directories and file names
    pub fn path_name(&self) -> String {
        self.name.to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relations: Vec<RelationDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    /// Abstract type tag (`string`, `number`, `boolean`, `enum`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
    /// Constraints such as `required`, `unique`, `default` or `values`
    #[serde(flatten)]
    pub constraints: BTreeMap<String, JsonValue>,
}

/// A declared reference to another module.
///
/// Keys are optional on purpose: a relation with missing keys still loads and
/// is rejected later by the relation resolver instead of failing the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,
    /// Local field of the reciprocal relation; only ever set by resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_field: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

/// Artifact kinds a module can request under `generate`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ArtifactKind {
    /// Module wiring file
    Module,
    Controller,
    Service,
    /// Create and update data-transfer objects
    Dto,
    /// Entity definition, written under `entities/`
    Entity,
    /// Any other kind, rendered from `<kind>.ts.tera`
    Other(String),
}

impl ArtifactKind {
    pub fn as_str(&self) -> &str {
        match self {
            ArtifactKind::Module => "module",
            ArtifactKind::Controller => "controller",
            ArtifactKind::Service => "service",
            ArtifactKind::Dto => "dto",
            ArtifactKind::Entity => "entity",
            ArtifactKind::Other(kind) => kind,
        }
    }
}

impl From<String> for ArtifactKind {
    fn from(value: String) -> Self {
        let normalized = value.trim().to_lowercase();
        match normalized.as_str() {
            "module" | "module-wiring" => ArtifactKind::Module,
            "controller" => ArtifactKind::Controller,
            "service" => ArtifactKind::Service,
            "dto" | "dtos" | "data-transfer-objects" => ArtifactKind::Dto,
            "entity" | "entity-definition" => ArtifactKind::Entity,
            _ => ArtifactKind::Other(normalized),
        }
    }
}

impl From<ArtifactKind> for String {
    fn from(kind: ArtifactKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relation cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::OneToOne => "one-to-one",
            RelationKind::OneToMany => "one-to-many",
            RelationKind::ManyToOne => "many-to-one",
            RelationKind::ManyToMany => "many-to-many",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = String;

    /// Accepts `many-to-one`, `many_to_one`, `ManyToOne` and similar spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match to_kebab_case(s.trim()).as_str() {
            "one-to-one" => Ok(RelationKind::OneToOne),
            "one-to-many" => Ok(RelationKind::OneToMany),
            "many-to-one" => Ok(RelationKind::ManyToOne),
            "many-to-many" => Ok(RelationKind::ManyToMany),
            _ => Err(format!("unknown relation type '{s}'")),
        }
    }
}

/// What happens to the owning row when the referenced row is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum OnDeletePolicy {
    #[default]
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[serde(rename = "NO ACTION")]
    NoAction,
}

impl OnDeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnDeletePolicy::Cascade => "CASCADE",
            OnDeletePolicy::SetNull => "SET NULL",
            OnDeletePolicy::SetDefault => "SET DEFAULT",
            OnDeletePolicy::Restrict => "RESTRICT",
            OnDeletePolicy::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for OnDeletePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "CASCADE" => Ok(OnDeletePolicy::Cascade),
            "SET NULL" => Ok(OnDeletePolicy::SetNull),
            "SET DEFAULT" => Ok(OnDeletePolicy::SetDefault),
            "RESTRICT" => Ok(OnDeletePolicy::Restrict),
            "NO ACTION" => Ok(OnDeletePolicy::NoAction),
            _ => Err(format!("unknown onDelete policy '{s}'")),
        }
    }
}

/// Treats an explicit `null` (e.g. `modules:` with nothing after it) like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
