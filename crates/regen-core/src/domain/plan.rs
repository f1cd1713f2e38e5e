//! Which templates are rendered and where the results go.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, naming::to_snake, sections::MarkerSyntax};

/// A template applied to every entity.
///
/// The destination of entity `Access Policy` is
/// `prefix + "access_policy" + suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputKind {
    pub template: PathBuf,
    pub prefix: String,
    pub suffix: String,
    /// Merge into the existing file instead of overwriting it.
    #[serde(default)]
    pub structured: bool,
    /// Leading template lines to drop before parsing (build directives).
    #[serde(default)]
    pub skip_directive_lines: usize,
}

impl OutputKind {
    pub fn destination(&self, entity_name: &str) -> PathBuf {
        PathBuf::from(format!("{}{}{}", self.prefix, to_snake(entity_name), self.suffix))
    }
}

/// A template rendered once per run to a fixed destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSpec {
    pub template: PathBuf,
    pub destination: PathBuf,
    #[serde(default)]
    pub structured: bool,
    #[serde(default)]
    pub skip_directive_lines: usize,
}

/// The changelog artifact: an external document passed through a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogSpec {
    pub source: PathBuf,
    #[serde(flatten)]
    pub artifact: ArtifactSpec,
}

/// Everything the generator needs besides the entities themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPlan {
    pub outputs: Vec<OutputKind>,
    pub manifest: ArtifactSpec,
    pub changelog: ChangelogSpec,
    #[serde(default)]
    pub markers: MarkerSyntax,
}

/// One file the run will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub destination: PathBuf,
    pub template: PathBuf,
    /// Entity name, or `manifest` / `changelog` for the aggregate artifacts.
    pub subject: String,
    pub structured: bool,
}

impl GenerationPlan {
    /// Every destination for `entity_names`, in the order they will be
    /// written: per entity, per output kind, then manifest and changelog.
    ///
    /// Fails if two files would land on the same path.
    pub fn files<I, S>(&self, entity_names: I) -> Result<Vec<PlannedFile>, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut files = Vec::new();

        for name in entity_names {
            let name = name.as_ref();
            for output in &self.outputs {
                files.push(PlannedFile {
                    destination: output.destination(name),
                    template: output.template.clone(),
                    subject: name.to_string(),
                    structured: output.structured,
                });
            }
        }

        for (subject, artifact) in [
            ("manifest", &self.manifest),
            ("changelog", &self.changelog.artifact),
        ] {
            files.push(PlannedFile {
                destination: artifact.destination.clone(),
                template: artifact.template.clone(),
                subject: subject.to_string(),
                structured: artifact.structured,
            });
        }

        let mut seen = HashSet::new();
        for file in &files {
            if !seen.insert(&file.destination) {
                return Err(DomainError::DuplicateDestination {
                    path: file.destination.display().to_string(),
                });
            }
        }

        Ok(files)
    }
}
