//! Generate Service - main application orchestrator.
//!
//! This service coordinates the entire generation workflow:
//! 1. Load and augment every entity
//! 2. Check the destination plan for collisions
//! 3. Render each (entity, output kind) pair, merge with the prior file, write
//! 4. Render the manifest and changelog artifacts
//!
//! Processing stops at the first error. Files written before that point stay
//! on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SchemaSource, TemplateRenderer, TemplateStore},
    },
    domain::{
        Entity, FunctionTable, GenerationPlan, MergeEngine, MergeStrategy, PlannedFile,
        RenderInput, TemplateText, augment_entity,
    },
    error::RegenResult,
};

/// What happened to one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Entity name, or `manifest` / `changelog`.
    pub subject: String,
    pub strategy: MergeStrategy,
    /// `false` when the file already had exactly this content.
    pub changed: bool,
    /// Rendered sections that could not be placed in the prior file.
    pub skipped_sections: Vec<String>,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Entity names in load order.
    pub entities: Vec<String>,
    /// Every destination in write order.
    pub files: Vec<FileReport>,
}

impl GenerationReport {
    pub fn changed_count(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }

    pub fn count(&self, strategy: MergeStrategy) -> usize {
        self.files.iter().filter(|f| f.strategy == strategy).count()
    }

    pub fn skipped_sections(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.files.iter().flat_map(|f| {
            f.skipped_sections
                .iter()
                .map(move |s| (f.path.as_path(), s.as_str()))
        })
    }
}

/// Main generation service.
pub struct GenerateService {
    schemas: Box<dyn SchemaSource>,
    templates: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    functions: FunctionTable,
}

impl GenerateService {
    /// Create a new generate service with the given adapters and the
    /// standard helper table.
    pub fn new(
        schemas: Box<dyn SchemaSource>,
        templates: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            schemas,
            templates,
            renderer,
            filesystem,
            functions: FunctionTable::standard(),
        }
    }

    /// Replace the helper table passed to every render call.
    pub fn with_functions(mut self, functions: FunctionTable) -> Self {
        self.functions = functions;
        self
    }

    /// Load every entity and fill in derived fields.
    pub fn load_entities(&self) -> RegenResult<Vec<Entity>> {
        let mut entities = self.schemas.load_all()?;
        for entity in &mut entities {
            augment_entity(entity)?;
        }
        info!(count = entities.len(), "Entities loaded");
        Ok(entities)
    }

    /// Destinations a run over `entities` would write, in write order.
    pub fn plan_files(
        &self,
        plan: &GenerationPlan,
        entities: &[Entity],
    ) -> RegenResult<Vec<PlannedFile>> {
        Ok(plan.files(entities.iter().map(|e| e.name.as_str()))?)
    }

    /// Run the whole batch.
    #[instrument(skip_all, fields(outputs = plan.outputs.len()))]
    pub fn generate(&self, plan: &GenerationPlan) -> RegenResult<GenerationReport> {
        let entities = self.load_entities()?;
        self.plan_files(plan, &entities)?;

        let output_templates = plan
            .outputs
            .iter()
            .map(|o| self.templates.load(&o.template, o.skip_directive_lines))
            .collect::<RegenResult<Vec<_>>>()?;
        let manifest_template = self
            .templates
            .load(&plan.manifest.template, plan.manifest.skip_directive_lines)?;
        let changelog_template = self.templates.load(
            &plan.changelog.artifact.template,
            plan.changelog.artifact.skip_directive_lines,
        )?;

        let engine = MergeEngine::new(plan.markers.clone());
        let mut report = GenerationReport::default();

        for entity in &entities {
            info!(entity = %entity.name, "Generating");
            let input = RenderInput::Entity(entity);
            for (output, template) in plan.outputs.iter().zip(&output_templates) {
                let destination = output.destination(&entity.name);
                let file = self.emit(&engine, template, &input, &destination, output.structured)?;
                report.files.push(file);
            }
            report.entities.push(entity.name.clone());
        }

        let manifest = self.emit(
            &engine,
            &manifest_template,
            &RenderInput::Manifest(&report.entities),
            &plan.manifest.destination,
            plan.manifest.structured,
        )?;
        report.files.push(manifest);

        let source = &plan.changelog.source;
        let changelog = self.filesystem.read_to_string(source)?.ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: source.clone(),
                reason: "changelog document not found".into(),
            }
        })?;
        let changelog = self.emit(
            &engine,
            &changelog_template,
            &RenderInput::Changelog(&changelog),
            &plan.changelog.artifact.destination,
            plan.changelog.artifact.structured,
        )?;
        report.files.push(changelog);

        info!(
            files = report.files.len(),
            changed = report.changed_count(),
            "Generation completed"
        );
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Render, merge and write a single destination.
    fn emit(
        &self,
        engine: &MergeEngine,
        template: &TemplateText,
        input: &RenderInput<'_>,
        destination: &Path,
        structured: bool,
    ) -> RegenResult<FileReport> {
        let rendered = self.renderer.render(template, input, &self.functions)?;
        let prior = self.filesystem.read_to_string(destination)?;

        let outcome = engine
            .merge(&rendered, prior.as_deref(), structured)
            .map_err(|e| ApplicationError::MergeFailed {
                path: destination.to_path_buf(),
                reason: e.to_string(),
            })?;

        let changed = prior.as_deref() != Some(outcome.content.as_str());
        if changed {
            if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(destination, &outcome.content)?;
        }

        debug!(
            path = %destination.display(),
            subject = input.subject(),
            strategy = ?outcome.strategy,
            changed,
            "Destination processed"
        );

        Ok(FileReport {
            path: destination.to_path_buf(),
            subject: input.subject().to_string(),
            strategy: outcome.strategy,
            changed,
            skipped_sections: outcome.skipped_sections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::application::ports::output::{MockFilesystem, MockSchemaSource, MockTemplateStore};
    use crate::domain::{ArtifactSpec, ChangelogSpec, MarkerSyntax, OutputKind};
    use crate::error::RegenError;

    /// Renders a fixed shape so tests can reason about sections.
    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            template: &TemplateText,
            input: &RenderInput<'_>,
            _functions: &FunctionTable,
        ) -> RegenResult<String> {
            if template.body == "broken" {
                return Err(ApplicationError::RenderingFailed {
                    template: template.id.clone(),
                    subject: input.subject().to_string(),
                    reason: "unexpected end of template".into(),
                }
                .into());
            }
            Ok(match input {
                RenderInput::Entity(e) => format!(
                    "//template:begin body\n{} {}\n//template:end body\n",
                    e.name,
                    e.attributes.len()
                ),
                RenderInput::Manifest(names) => format!("{}\n", names.join(",")),
                RenderInput::Changelog(text) => text.to_string(),
            })
        }
    }

    fn plan() -> GenerationPlan {
        GenerationPlan {
            outputs: vec![OutputKind {
                template: "model.tmpl".into(),
                prefix: "out/model_".into(),
                suffix: ".go".into(),
                structured: true,
                skip_directive_lines: 0,
            }],
            manifest: ArtifactSpec {
                template: "manifest.tmpl".into(),
                destination: "out/manifest.txt".into(),
                structured: false,
                skip_directive_lines: 0,
            },
            changelog: ChangelogSpec {
                source: "CHANGELOG.md".into(),
                artifact: ArtifactSpec {
                    template: "changelog.tmpl".into(),
                    destination: "docs/changelog.md".into(),
                    structured: false,
                    skip_directive_lines: 0,
                },
            },
            markers: MarkerSyntax::default(),
        }
    }

    fn schemas(names: &[&str]) -> MockSchemaSource {
        let entities: Vec<Entity> = names.iter().map(|n| Entity::new(*n)).collect();
        let mut schemas = MockSchemaSource::new();
        schemas
            .expect_load_all()
            .returning(move || Ok(entities.clone()));
        schemas
    }

    fn templates(broken: bool) -> MockTemplateStore {
        let mut store = MockTemplateStore::new();
        store.expect_load().returning(move |path, _| {
            let body = if broken { "broken" } else { "ok" };
            Ok(TemplateText::new(path.display().to_string(), body))
        });
        store
    }

    /// Filesystem backed by a shared map; returns the map for assertions.
    fn filesystem(
        initial: &[(&str, &str)],
    ) -> (MockFilesystem, Arc<Mutex<HashMap<PathBuf, String>>>) {
        let files: HashMap<PathBuf, String> = initial
            .iter()
            .map(|(p, c)| (PathBuf::from(p), c.to_string()))
            .collect();
        let files = Arc::new(Mutex::new(files));

        let mut fs = MockFilesystem::new();
        let read = Arc::clone(&files);
        fs.expect_read_to_string()
            .returning(move |path| Ok(read.lock().unwrap().get(path).cloned()));
        let write = Arc::clone(&files);
        fs.expect_write_file().returning(move |path, content| {
            write
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        });
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        (fs, files)
    }

    fn service(
        schemas: MockSchemaSource,
        templates: MockTemplateStore,
        fs: MockFilesystem,
    ) -> GenerateService {
        GenerateService::new(
            Box::new(schemas),
            Box::new(templates),
            Box::new(EchoRenderer),
            Box::new(fs),
        )
    }

    #[test]
    fn writes_every_destination_in_order() {
        let (fs, files) = filesystem(&[("CHANGELOG.md", "## 0.1.0\n")]);
        let service = service(schemas(&["Rule", "Access Policy"]), templates(false), fs);

        let report = service.generate(&plan()).unwrap();

        let paths: Vec<_> = report.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/model_rule.go"),
                PathBuf::from("out/model_access_policy.go"),
                PathBuf::from("out/manifest.txt"),
                PathBuf::from("docs/changelog.md"),
            ]
        );
        let files = files.lock().unwrap();
        assert_eq!(files[&PathBuf::from("out/manifest.txt")], "Rule,Access Policy\n");
        assert_eq!(files[&PathBuf::from("docs/changelog.md")], "## 0.1.0\n");
        assert_eq!(report.count(MergeStrategy::Fresh), 4);
    }

    #[test]
    fn prior_file_is_merged() {
        let prior = "// hand written\n//template:begin body\nstale\n//template:end body\n";
        let (fs, files) = filesystem(&[
            ("CHANGELOG.md", ""),
            ("out/model_host.go", prior),
        ]);
        let service = service(schemas(&["Host"]), templates(false), fs);

        let report = service.generate(&plan()).unwrap();

        assert_eq!(report.files[0].strategy, MergeStrategy::Merged);
        assert_eq!(
            files.lock().unwrap()[&PathBuf::from("out/model_host.go")],
            "// hand written\n//template:begin body\nHost 0\n//template:end body\n"
        );
    }

    #[test]
    fn unchanged_files_are_not_rewritten() {
        let (fs, _) = filesystem(&[
            ("CHANGELOG.md", "log\n"),
            ("out/model_host.go", "//template:begin body\nHost 0\n//template:end body\n"),
            ("out/manifest.txt", "Host\n"),
            ("docs/changelog.md", "log\n"),
        ]);
        let service = service(schemas(&["Host"]), templates(false), fs);

        let report = service.generate(&plan()).unwrap();
        assert_eq!(report.changed_count(), 0);
    }

    #[test]
    fn schema_error_aborts_before_writing() {
        let mut schemas = MockSchemaSource::new();
        schemas.expect_load_all().returning(|| {
            Err(ApplicationError::SchemaParse {
                path: "defs/host.yaml".into(),
                reason: "bad indentation".into(),
            }
            .into())
        });
        let mut fs = MockFilesystem::new();
        fs.expect_write_file().never();

        let service = service(schemas, MockTemplateStore::new(), fs);
        let err = service.generate(&plan()).unwrap_err();
        assert!(matches!(
            err,
            RegenError::Application(ApplicationError::SchemaParse { .. })
        ));
    }

    #[test]
    fn unterminated_prior_section_leaves_file_untouched() {
        let prior = "//template:begin body\nno end marker\n";
        let (fs, files) = filesystem(&[("CHANGELOG.md", ""), ("out/model_host.go", prior)]);
        let service = service(schemas(&["Host"]), templates(false), fs);

        let err = service.generate(&plan()).unwrap_err();

        assert!(matches!(
            err,
            RegenError::Application(ApplicationError::MergeFailed { .. })
        ));
        assert_eq!(files.lock().unwrap()[&PathBuf::from("out/model_host.go")], prior);
    }

    #[test]
    fn render_error_names_template_and_entity() {
        let (fs, _) = filesystem(&[("CHANGELOG.md", "")]);
        let service = service(schemas(&["Host"]), templates(true), fs);

        match service.generate(&plan()).unwrap_err() {
            RegenError::Application(ApplicationError::RenderingFailed {
                template, subject, ..
            }) => {
                assert_eq!(template, "model.tmpl");
                assert_eq!(subject, "Host");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_changelog_fails_after_entities() {
        let (fs, files) = filesystem(&[]);
        let service = service(schemas(&["Host"]), templates(false), fs);

        let err = service.generate(&plan()).unwrap_err();

        assert!(matches!(
            err,
            RegenError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(files.lock().unwrap().contains_key(&PathBuf::from("out/model_host.go")));
    }

    #[test]
    fn duplicate_attribute_names_abort() {
        let mut schemas = MockSchemaSource::new();
        schemas.expect_load_all().returning(|| {
            let yaml = "name: Host\nattributes:\n  - model_name: ipAddress\n  - model_name: IpAddress\n";
            Ok(vec![serde_yaml::from_str::<Entity>(yaml).unwrap()])
        });
        let service = service(schemas, MockTemplateStore::new(), MockFilesystem::new());

        assert!(matches!(
            service.generate(&plan()),
            Err(RegenError::Domain(
                crate::domain::DomainError::DuplicateAttributeName { .. }
            ))
        ));
    }
}
