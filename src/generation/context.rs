//! Render contexts handed to the templates

use serde_json::{Map, Value as JsonValue, json};

use crate::blueprint::{ModuleDefinition, RootSettings};
use crate::core::utils::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
use crate::generation::{GenerationError, RelationMap, map_type};

/// Variables available to one template render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    data: Map<String, JsonValue>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for the artifacts of one entity module.
    ///
    /// Exposes the module name in several casings, the entity (with a
    /// `tsType` added to every field and resolved inverse fields on the
    /// relations), the auth flag and the module's resolved relations in
    /// declaration order.
    pub fn for_module(
        module: &ModuleDefinition,
        relations: &RelationMap,
    ) -> Result<Self, GenerationError> {
        let mut context = Self::new();

        context.add_variable("module", json!(module.name));
        context.add_variable("module_lower", json!(module.path_name()));
        context.add_variable("module_snake", json!(to_snake_case(&module.name)));
        context.add_variable("module_pascal", json!(to_pascal_case(&module.name)));
        context.add_variable("module_camel", json!(to_camel_case(&module.name)));
        context.add_variable("module_kebab", json!(to_kebab_case(&module.name)));
        context.add_variable("authProtected", json!(module.auth_protected));

        let mut entity = serde_json::to_value(&module.entity)?;
        if let Some(fields) = entity.get_mut("fields").and_then(JsonValue::as_array_mut) {
            for (field, descriptor) in fields.iter_mut().zip(&module.entity.fields) {
                if let Some(object) = field.as_object_mut() {
                    let tag = descriptor.type_tag.as_deref().unwrap_or_default();
                    object.insert("tsType".to_string(), json!(map_type(tag)));
                }
            }
        }
        context.add_variable("entity", entity);

        let mut resolved = Vec::new();
        for (index, descriptor) in module.entity.relations.iter().enumerate() {
            let Some(target) = descriptor.model.as_deref().map(str::trim) else {
                continue;
            };
            if let Some(relation) = relations.get(&module.name, target) {
                if relation.declaration_index(module) == Some(index) {
                    resolved.push(serde_json::to_value(relation)?);
                }
            }
        }
        context.add_variable("relations", JsonValue::Array(resolved));

        Ok(context)
    }

    /// Context for the root-level artifacts
    pub fn for_root(
        root: &RootSettings,
        modules: &[ModuleDefinition],
    ) -> Result<Self, GenerationError> {
        let mut context = Self::new();

        context.add_variable("root", serde_json::to_value(root)?);
        context.add_variable("modules", serde_json::to_value(modules)?);
        context.add_variable(
            "module_names",
            json!(modules.iter().map(|m| m.name.as_str()).collect::<Vec<_>>()),
        );

        Ok(context)
    }

    pub fn add_variable(&mut self, key: &str, value: JsonValue) {
        self.data.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.data.get(key)
    }

    /// The context as a JSON object, the shape renderers consume
    pub fn to_value(&self) -> JsonValue {
        JsonValue::Object(self.data.clone())
    }
}
