//! Emits the artifacts requested by one entity module

use std::path::{Path, PathBuf};

use crate::blueprint::{ArtifactKind, ModuleDefinition};
use crate::generation::rules::{validate_artifact_kind, validate_module_name};
use crate::generation::{
    ArtifactSpec, ArtifactWriter, EmitReport, GenerationError, RelationMap, RenderContext,
    SOURCE_DIR, TEMPLATE_EXTENSION,
};

pub const CREATE_DTO_TEMPLATE: &str = "dto/create-dto.ts.tera";
pub const UPDATE_DTO_TEMPLATE: &str = "dto/update-dto.ts.tera";
pub const ENTITY_TEMPLATE: &str = "entity.ts.tera";

const DTO_DIR: &str = "dto";
const ENTITIES_DIR: &str = "entities";

/// Renders a module's artifacts into `<output>/src/<module lowercased>/`
pub struct ModuleEmitter<'a> {
    writer: &'a ArtifactWriter<'a>,
    src_dir: PathBuf,
}

impl<'a> ModuleEmitter<'a> {
    pub fn new(writer: &'a ArtifactWriter<'a>, output_root: &Path) -> Self {
        Self {
            writer,
            src_dir: output_root.join(SOURCE_DIR),
        }
    }

    pub fn module_dir(&self, module: &ModuleDefinition) -> PathBuf {
        self.src_dir.join(module.path_name())
    }

    /// The files one artifact kind expands into.
    ///
    /// `dto` expands into a create and an update variant, `entity` goes under
    /// `entities/`, anything else becomes `<module>.<kind>.ts`.
    pub fn plan(
        &self,
        module: &ModuleDefinition,
        kind: &ArtifactKind,
    ) -> Result<Vec<ArtifactSpec>, GenerationError> {
        let name = module.path_name();
        let module_dir = self.module_dir(module);

        let specs = match kind {
            ArtifactKind::Dto => {
                let dto_dir = module_dir.join(DTO_DIR);
                vec![
                    ArtifactSpec::new(
                        "create DTO",
                        CREATE_DTO_TEMPLATE,
                        dto_dir.join(format!("create-{name}.dto.ts")),
                    ),
                    ArtifactSpec::new(
                        "update DTO",
                        UPDATE_DTO_TEMPLATE,
                        dto_dir.join(format!("update-{name}.dto.ts")),
                    ),
                ]
            }
            ArtifactKind::Entity => vec![ArtifactSpec::new(
                "entity",
                ENTITY_TEMPLATE,
                module_dir
                    .join(ENTITIES_DIR)
                    .join(format!("{name}.entity.ts")),
            )],
            other => {
                let kind = other.as_str();
                validate_artifact_kind(kind)?;
                vec![ArtifactSpec::new(
                    kind,
                    format!("{kind}{TEMPLATE_EXTENSION}"),
                    module_dir.join(format!("{name}.{kind}.ts")),
                )]
            }
        };

        Ok(specs)
    }

    /// Render every requested artifact; failures are reported per artifact
    pub fn emit(&self, module: &ModuleDefinition, relations: &RelationMap) -> EmitReport {
        let reporter = self.writer.reporter();
        let owner = format!("module {}", module.name);
        let mut report = EmitReport::default();

        reporter.start(&format!("Generating module: {}", module.name));

        let context = validate_module_name(&module.name)
            .and_then(|()| RenderContext::for_module(module, relations));
        let context = match context {
            Ok(context) => context,
            Err(e) => {
                for kind in &module.generate {
                    self.writer.fail(&owner, kind.as_str(), &e, &mut report);
                }
                reporter.end(&format!("Skipped module: {}", module.name));
                return report;
            }
        };

        if module.generate.is_empty() {
            reporter.warning(&format!(
                "Module '{}' does not request any artifacts",
                module.name
            ));
        } else if let Err(e) = self.writer.output().ensure_directory(&self.module_dir(module)) {
            reporter.warning(&format!(
                "Could not prepare directory for {owner}: {e}"
            ));
        }

        for kind in &module.generate {
            match self.plan(module, kind) {
                Ok(specs) => {
                    for spec in &specs {
                        self.writer.write(&owner, spec, &context, &mut report);
                    }
                }
                Err(e) => self.writer.fail(&owner, kind.as_str(), &e, &mut report),
            }
        }

        reporter.end(&format!(
            "Generated module: {} ({} written, {} failed)",
            module.name,
            report.written.len(),
            report.failed.len()
        ));
        report
    }
}
