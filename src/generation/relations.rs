//! Relation resolution across entity modules
//!
//! Resolution runs in three passes over every declared relation:
//!
//! 1. **Collect** a candidate per relation, keyed by `(source module, target
//!    module)`. Relations missing `model`, `type` or `field` are reported and
//!    skipped.
//! 2. **Validate** that every target names a declared module; dangling
//!    relations are reported and dropped.
//! 3. **Cross-link** each surviving `(A, B)` with `(B, A)` when both exist,
//!    recording the reverse relation's local field as the inverse field.
//!
//! The result is then written back into the originating descriptors so the
//! templates can see inverse fields directly. Nothing here fails a run.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::blueprint::{ModuleDefinition, OnDeletePolicy, RelationDescriptor, RelationKind};
use crate::generation::Reporter;

/// `(source module, target module)`
pub type RelationKey = (String, String);

/// A validated relation between two declared modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRelation {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
    pub field: String,
    pub on_delete: OnDeletePolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse_field: Option<String>,
}

impl ResolvedRelation {
    fn key(&self) -> RelationKey {
        (self.source.clone(), self.target.clone())
    }

    // Total order used to pick one relation when a module declares several
    // relations to the same target.
    fn rank(&self) -> (&str, RelationKind, OnDeletePolicy) {
        (self.field.as_str(), self.kind, self.on_delete)
    }

    /// Index of the declaration this relation was resolved from: the first
    /// descriptor of `module` with the same target, type and field.
    ///
    /// Other declarations to the same target lost the tie-break and are not
    /// bound to this relation.
    pub fn declaration_index(&self, module: &ModuleDefinition) -> Option<usize> {
        if module.name != self.source {
            return None;
        }
        module.entity.relations.iter().position(|descriptor| {
            present(&descriptor.model) == Some(self.target.as_str())
                && present(&descriptor.field) == Some(self.field.as_str())
                && present(&descriptor.kind).and_then(|kind| kind.parse().ok()) == Some(self.kind)
        })
    }
}

/// Resolved relations keyed by `(source, target)`, rebuilt on every run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationMap {
    entries: BTreeMap<RelationKey, ResolvedRelation>,
}

impl RelationMap {
    pub fn get(&self, source: &str, target: &str) -> Option<&ResolvedRelation> {
        self.entries.get(&(source.to_string(), target.to_string()))
    }

    pub fn contains(&self, source: &str, target: &str) -> bool {
        self.get(source, target).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All relations in key order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedRelation> {
        self.entries.values()
    }

    /// Relations owned by one module, in target order
    pub fn relations_from<'a>(
        &'a self,
        source: &'a str,
    ) -> impl Iterator<Item = &'a ResolvedRelation> + 'a {
        self.entries.values().filter(move |r| r.source == source)
    }
}

/// Builds the [`RelationMap`] for a blueprint's modules
pub struct RelationResolver<'a> {
    reporter: &'a dyn Reporter,
}

impl<'a> RelationResolver<'a> {
    pub fn new(reporter: &'a dyn Reporter) -> Self {
        Self { reporter }
    }

    /// Resolve all relations and annotate the descriptors with the result.
    ///
    /// The declaration each resolved relation came from gets its canonical
    /// `type` and `onDelete` and, when the target declares a relation back,
    /// its `inverseField`. Declarations that lost a tie-break keep their
    /// input values. Any `inverseField` present in the input is discarded
    /// first.
    pub fn resolve(&self, modules: &mut [ModuleDefinition]) -> RelationMap {
        let map = self.build_map(modules);
        write_back(modules, &map);
        self.reporter.debug(&format!(
            "Resolved {} relation(s) across {} module(s)",
            map.len(),
            modules.len()
        ));
        map
    }

    /// Run the collect, validate and cross-link passes without touching the
    /// descriptors
    pub fn build_map(&self, modules: &[ModuleDefinition]) -> RelationMap {
        let known: BTreeSet<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        let candidates = self.collect(modules);
        let valid = self.validate(candidates, &known);
        cross_link(valid)
    }

    fn collect(&self, modules: &[ModuleDefinition]) -> BTreeMap<RelationKey, ResolvedRelation> {
        let mut candidates = BTreeMap::new();

        for module in modules {
            for (index, descriptor) in module.entity.relations.iter().enumerate() {
                let Some(candidate) = self.candidate(module, index, descriptor) else {
                    continue;
                };

                match candidates.entry(candidate.key()) {
                    Entry::Vacant(slot) => {
                        slot.insert(candidate);
                    }
                    Entry::Occupied(mut slot) => {
                        let (kept, ignored) = if candidate.rank() < slot.get().rank() {
                            (candidate.field.clone(), slot.get().field.clone())
                        } else {
                            (slot.get().field.clone(), candidate.field.clone())
                        };
                        self.reporter.warning(&format!(
                            "Module '{}' declares more than one relation to '{}'; keeping field '{}', ignoring '{}'",
                            candidate.source, candidate.target, kept, ignored
                        ));
                        if candidate.rank() < slot.get().rank() {
                            slot.insert(candidate);
                        }
                    }
                }
            }
        }

        candidates
    }

    fn candidate(
        &self,
        module: &ModuleDefinition,
        index: usize,
        descriptor: &RelationDescriptor,
    ) -> Option<ResolvedRelation> {
        let (target, kind, field) = match (
            present(&descriptor.model),
            present(&descriptor.kind),
            present(&descriptor.field),
        ) {
            (Some(target), Some(kind), Some(field)) => (target, kind, field),
            (target, kind, field) => {
                let missing: Vec<&str> = [("model", target), ("type", kind), ("field", field)]
                    .into_iter()
                    .filter(|(_, value)| value.is_none())
                    .map(|(key, _)| key)
                    .collect();
                self.reporter.error(&format!(
                    "Module '{}': relation #{} ({}) is missing {}; skipping it",
                    module.name,
                    index + 1,
                    describe(descriptor),
                    missing.join(", ")
                ));
                return None;
            }
        };

        let kind = match kind.parse::<RelationKind>() {
            Ok(kind) => kind,
            Err(e) => {
                self.reporter.error(&format!(
                    "Module '{}': relation #{} ({}) has an {}; skipping it",
                    module.name,
                    index + 1,
                    describe(descriptor),
                    e
                ));
                return None;
            }
        };

        let on_delete = match present(&descriptor.on_delete) {
            None => OnDeletePolicy::default(),
            Some(policy) => policy.parse().unwrap_or_else(|e| {
                self.reporter.warning(&format!(
                    "Module '{}': relation '{}' has an {}; using {}",
                    module.name,
                    field,
                    e,
                    OnDeletePolicy::default()
                ));
                OnDeletePolicy::default()
            }),
        };

        Some(ResolvedRelation {
            source: module.name.clone(),
            target: target.to_string(),
            kind,
            field: field.to_string(),
            on_delete,
            inverse_field: None,
        })
    }

    fn validate(
        &self,
        candidates: BTreeMap<RelationKey, ResolvedRelation>,
        known: &BTreeSet<&str>,
    ) -> BTreeMap<RelationKey, ResolvedRelation> {
        candidates
            .into_iter()
            .filter(|(_, relation)| {
                let exists = known.contains(relation.target.as_str());
                if !exists {
                    self.reporter.warning(&format!(
                        "Dropping relation {}.{} -> {}: module '{}' is not defined",
                        relation.source, relation.field, relation.target, relation.target
                    ));
                }
                exists
            })
            .collect()
    }
}

/// Annotate every surviving `(A, B)` with the local field of `(B, A)`.
///
/// Self relations never get an inverse: their reverse key is the entry itself.
fn cross_link(mut relations: BTreeMap<RelationKey, ResolvedRelation>) -> RelationMap {
    let inverses: Vec<(RelationKey, String)> = relations
        .iter()
        .filter(|((source, target), _)| source != target)
        .filter_map(|((source, target), _)| {
            relations
                .get(&(target.clone(), source.clone()))
                .map(|reverse| ((source.clone(), target.clone()), reverse.field.clone()))
        })
        .collect();

    for (key, inverse_field) in inverses {
        if let Some(relation) = relations.get_mut(&key) {
            relation.inverse_field = Some(inverse_field);
        }
    }

    RelationMap { entries: relations }
}

fn write_back(modules: &mut [ModuleDefinition], map: &RelationMap) {
    for module in modules.iter_mut() {
        for descriptor in module.entity.relations.iter_mut() {
            descriptor.inverse_field = None;
        }

        let bound: Vec<(usize, ResolvedRelation)> = map
            .relations_from(&module.name)
            .filter_map(|resolved| Some((resolved.declaration_index(module)?, resolved.clone())))
            .collect();

        for (index, resolved) in bound {
            let descriptor = &mut module.entity.relations[index];
            descriptor.model = Some(resolved.target.clone());
            descriptor.field = Some(resolved.field.clone());
            descriptor.kind = Some(resolved.kind.as_str().to_string());
            descriptor.on_delete = Some(resolved.on_delete.as_str().to_string());
            descriptor.inverse_field = resolved.inverse_field.clone();
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn describe(descriptor: &RelationDescriptor) -> String {
    format!(
        "{} -> {}",
        present(&descriptor.field).unwrap_or("?"),
        present(&descriptor.model).unwrap_or("?")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::testing::{RecordingReporter, blueprint};

    const USER_POST: &str = r#"
modules:
  - name: User
    entity:
      relations:
        - { model: Post, type: one-to-many, field: posts }
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: author }
"#;

    fn resolve(yaml: &str) -> (Vec<ModuleDefinition>, RelationMap, RecordingReporter) {
        let reporter = RecordingReporter::new();
        let mut modules = blueprint(yaml).modules;
        let map = RelationResolver::new(&reporter).resolve(&mut modules);
        (modules, map, reporter)
    }

    #[test]
    fn test_reciprocal_relations_get_inverse_fields() {
        let (modules, map, reporter) = resolve(USER_POST);

        assert_eq!(map.len(), 2);
        let post_user = map.get("Post", "User").unwrap();
        assert_eq!(post_user.kind, RelationKind::ManyToOne);
        assert_eq!(post_user.field, "author");
        assert_eq!(post_user.inverse_field.as_deref(), Some("posts"));

        let user_post = map.get("User", "Post").unwrap();
        assert_eq!(user_post.kind, RelationKind::OneToMany);
        assert_eq!(user_post.inverse_field.as_deref(), Some("author"));

        // Written back for the templates
        let user_relation = &modules[0].entity.relations[0];
        assert_eq!(user_relation.inverse_field.as_deref(), Some("author"));
        let post_relation = &modules[1].entity.relations[0];
        assert_eq!(post_relation.inverse_field.as_deref(), Some("posts"));

        assert!(reporter.warnings().is_empty());
        assert!(reporter.errors().is_empty());
    }

    #[test]
    fn test_one_way_relation_has_no_inverse() {
        let (modules, map, _) = resolve(
            r#"
modules:
  - name: User
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: author }
"#,
        );

        assert_eq!(map.len(), 1);
        assert!(map.get("Post", "User").unwrap().inverse_field.is_none());
        assert!(!map.contains("User", "Post"));
        assert!(modules[1].entity.relations[0].inverse_field.is_none());
    }

    #[test]
    fn test_dangling_relation_is_dropped_with_warning() {
        let (modules, map, reporter) = resolve(
            r#"
modules:
  - name: Post
    entity:
      relations:
        - { model: Usr, type: many-to-one, field: author }
        - { model: Post, type: many-to-one, field: parent }
"#,
        );

        assert!(!map.contains("Post", "Usr"));
        assert!(map.contains("Post", "Post"));
        assert_eq!(map.len(), 1);

        let warnings = reporter.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Post.author -> Usr"));
        assert!(warnings[0].contains("module 'Usr' is not defined"));

        // The dropped descriptor stays as declared, without an inverse
        let dropped = &modules[0].entity.relations[0];
        assert_eq!(dropped.model.as_deref(), Some("Usr"));
        assert!(dropped.inverse_field.is_none());
    }

    #[test]
    fn test_malformed_relations_are_skipped() {
        let (_, map, reporter) = resolve(
            r#"
modules:
  - name: User
  - name: Tag
  - name: Post
    entity:
      relations:
        - { type: many-to-one, field: author }
        - { model: User, field: editor }
        - { model: User, type: many-to-one, field: "  " }
        - { model: Tag, type: many-to-many, field: tags }
"#,
        );

        assert_eq!(map.len(), 1);
        assert!(map.contains("Post", "Tag"));
        assert!(!map.contains("Post", "User"));

        let errors = reporter.errors();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("relation #1 (author -> ?) is missing model"));
        assert!(errors[1].contains("relation #2 (editor -> User) is missing type"));
        assert!(errors[2].contains("is missing field"));
    }

    #[test]
    fn test_unknown_relation_type_is_skipped() {
        let (_, map, reporter) = resolve(
            r#"
modules:
  - name: User
  - name: Post
    entity:
      relations:
        - { model: User, type: some-to-few, field: author }
"#,
        );

        assert!(map.is_empty());
        assert_eq!(reporter.errors().len(), 1);
        assert!(reporter.errors()[0].contains("unknown relation type 'some-to-few'"));
    }

    #[test]
    fn test_on_delete_defaults_and_normalisation() {
        let (modules, map, reporter) = resolve(
            r#"
modules:
  - name: User
  - name: Team
  - name: Post
    entity:
      relations:
        - { model: User, type: many_to_one, field: author }
        - { model: Team, type: ManyToOne, field: team, onDelete: set-null }
  - name: Comment
    entity:
      relations:
        - { model: Post, type: many-to-one, field: post, onDelete: explode }
"#,
        );

        assert_eq!(map.get("Post", "User").unwrap().on_delete, OnDeletePolicy::Cascade);
        assert_eq!(map.get("Post", "Team").unwrap().on_delete, OnDeletePolicy::SetNull);
        assert_eq!(map.get("Comment", "Post").unwrap().on_delete, OnDeletePolicy::Cascade);
        assert_eq!(reporter.warnings().len(), 1);
        assert!(reporter.warnings()[0].contains("unknown onDelete policy 'explode'"));

        let author = &modules[2].entity.relations[0];
        assert_eq!(author.kind.as_deref(), Some("many-to-one"));
        assert_eq!(author.on_delete.as_deref(), Some("CASCADE"));
        let team = &modules[2].entity.relations[1];
        assert_eq!(team.on_delete.as_deref(), Some("SET NULL"));
    }

    #[test]
    fn test_stale_inverse_field_in_input_is_discarded() {
        let (modules, map, _) = resolve(
            r#"
modules:
  - name: User
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: author, inverseField: posts }
"#,
        );

        assert!(map.get("Post", "User").unwrap().inverse_field.is_none());
        assert!(modules[1].entity.relations[0].inverse_field.is_none());
    }

    #[test]
    fn test_self_relation_has_no_inverse() {
        let (_, map, _) = resolve(
            r#"
modules:
  - name: Category
    entity:
      relations:
        - { model: Category, type: many-to-one, field: parent }
"#,
        );

        let relation = map.get("Category", "Category").unwrap();
        assert!(relation.inverse_field.is_none());
    }

    #[test]
    fn test_duplicate_target_keeps_one_relation_regardless_of_order() {
        let forward = r#"
modules:
  - name: User
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: reviewer }
        - { model: User, type: many-to-one, field: author }
"#;
        let backward = r#"
modules:
  - name: User
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: author }
        - { model: User, type: many-to-one, field: reviewer }
"#;

        let (_, first, reporter) = resolve(forward);
        let (_, second, _) = resolve(backward);

        assert_eq!(first, second);
        assert_eq!(first.get("Post", "User").unwrap().field, "author");
        assert!(reporter.warnings()[0].contains("keeping field 'author', ignoring 'reviewer'"));
    }

    #[test]
    fn test_resolution_is_order_independent() {
        let declared = r#"
modules:
  - name: User
    entity:
      relations:
        - { model: Post, type: one-to-many, field: posts }
        - { model: Profile, type: one-to-one, field: profile }
        - { model: Ghost, type: one-to-one, field: ghost }
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: author }
        - { model: Tag, type: many-to-many, field: tags }
  - name: Tag
    entity:
      relations:
        - { model: Post, type: many-to-many, field: posts }
  - name: Profile
"#;
        let permuted = r#"
modules:
  - name: Profile
  - name: Tag
    entity:
      relations:
        - { model: Post, type: many-to-many, field: posts }
  - name: Post
    entity:
      relations:
        - { model: Tag, type: many-to-many, field: tags }
        - { model: User, type: many-to-one, field: author }
  - name: User
    entity:
      relations:
        - { model: Ghost, type: one-to-one, field: ghost }
        - { model: Profile, type: one-to-one, field: profile }
        - { model: Post, type: one-to-many, field: posts }
"#;

        let reporter = RecordingReporter::new();
        let resolver = RelationResolver::new(&reporter);
        let a = resolver.build_map(&blueprint(declared).modules);
        let b = resolver.build_map(&blueprint(permuted).modules);

        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
        assert_eq!(a.get("Tag", "Post").unwrap().inverse_field.as_deref(), Some("tags"));
        assert!(a.get("User", "Profile").unwrap().inverse_field.is_none());
        assert!(!a.contains("User", "Ghost"));
    }

    #[test]
    fn test_same_field_with_different_types_binds_one_declaration() {
        let (modules, map, reporter) = resolve(
            r#"
modules:
  - name: User
    entity:
      relations:
        - { model: Post, type: one-to-many, field: posts }
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: author, onDelete: restrict }
        - { model: User, type: one-to-one, field: author }
"#,
        );

        assert_eq!(map.len(), 2);
        let winner = map.get("Post", "User").unwrap();
        assert_eq!(winner.kind, RelationKind::OneToOne);
        assert_eq!(winner.declaration_index(&modules[1]), Some(1));
        assert_eq!(winner.declaration_index(&modules[0]), None);

        let relations = &modules[1].entity.relations;
        assert_eq!(relations[1].kind.as_deref(), Some("one-to-one"));
        assert_eq!(relations[1].on_delete.as_deref(), Some("CASCADE"));
        assert_eq!(relations[1].inverse_field.as_deref(), Some("posts"));
        // The losing declaration keeps its input values
        assert_eq!(relations[0].kind.as_deref(), Some("many-to-one"));
        assert_eq!(relations[0].on_delete.as_deref(), Some("restrict"));
        assert!(relations[0].inverse_field.is_none());

        assert_eq!(reporter.warnings().len(), 1);
    }

    #[test]
    fn test_identical_declarations_bind_the_first() {
        let (modules, map, _) = resolve(
            r#"
modules:
  - name: User
  - name: Post
    entity:
      relations:
        - { model: User, type: many-to-one, field: author }
        - { model: User, type: many-to-one, field: author }
"#,
        );

        let relation = map.get("Post", "User").unwrap();
        assert_eq!(relation.declaration_index(&modules[1]), Some(0));
        assert_eq!(modules[1].entity.relations[0].on_delete.as_deref(), Some("CASCADE"));
        assert!(modules[1].entity.relations[1].on_delete.is_none());
    }

    #[test]
    fn test_relations_from_module() {
        let (_, map, _) = resolve(USER_POST);
        let from_user: Vec<_> = map.relations_from("User").collect();
        assert_eq!(from_user.len(), 1);
        assert_eq!(from_user[0].target, "Post");
    }
}
