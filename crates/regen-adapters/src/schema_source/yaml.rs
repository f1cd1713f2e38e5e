//! Entity schemas loaded from a directory of YAML documents.
//!
//! Every `.yaml` / `.yml` file directly inside the definitions directory is
//! one entity. Files are visited in file-name order, which fixes the entity
//! load order and therefore the manifest order. Subdirectories and other
//! file types are ignored.

use std::{
    fs,
    path::{Path, PathBuf},
};

use regen_core::{
    application::{ApplicationError, ports::SchemaSource},
    domain::Entity,
    error::RegenResult,
};
use tracing::{debug, instrument};
use walkdir::WalkDir;

const EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Reads entity definitions from a directory.
#[derive(Debug, Clone)]
pub struct YamlSchemaSource {
    definitions_dir: PathBuf,
}

impl YamlSchemaSource {
    pub fn new(definitions_dir: impl Into<PathBuf>) -> Self {
        Self {
            definitions_dir: definitions_dir.into(),
        }
    }

    pub fn definitions_dir(&self) -> &Path {
        &self.definitions_dir
    }

    /// Schema files in load order.
    pub fn files(&self) -> RegenResult<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.definitions_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| ApplicationError::SchemaParse {
                path: e
                    .path()
                    .map_or_else(|| self.definitions_dir.clone(), Path::to_path_buf),
                reason: format!("directory walk error: {e}"),
            })?;
            let is_schema = entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| EXTENSIONS.contains(&ext));
            if is_schema {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn parse(path: &Path) -> RegenResult<Entity> {
        let raw = fs::read_to_string(path).map_err(|e| ApplicationError::SchemaParse {
            path: path.to_path_buf(),
            reason: format!("failed to read: {e}"),
        })?;
        let entity = serde_yaml::from_str(&raw).map_err(|e| ApplicationError::SchemaParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(entity)
    }
}

impl SchemaSource for YamlSchemaSource {
    #[instrument(skip_all, fields(dir = %self.definitions_dir.display()))]
    fn load_all(&self) -> RegenResult<Vec<Entity>> {
        let entities = self
            .files()?
            .iter()
            .map(|path| {
                let entity = Self::parse(path)?;
                debug!(path = %path.display(), entity = %entity.name, "Schema parsed");
                Ok(entity)
            })
            .collect::<RegenResult<Vec<_>>>()?;
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regen_core::error::RegenError;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn loads_in_file_name_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "rule.yaml", "name: Rule\n");
        write(dir.path(), "access_policy.yml", "name: Access Policy\n");
        write(dir.path(), "host.yaml", "name: Host\n");
        write(dir.path(), "README.md", "not a schema");
        fs::create_dir(dir.path().join("nested")).unwrap();
        write(&dir.path().join("nested"), "skip.yaml", "name: Skipped\n");

        let entities = YamlSchemaSource::new(dir.path()).load_all().unwrap();
        let names: Vec<_> = entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Access Policy", "Host", "Rule"]);
    }

    #[test]
    fn malformed_document_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "host.yaml", "name: Host\nattributes: [\n");

        match YamlSchemaSource::new(dir.path()).load_all().unwrap_err() {
            RegenError::Application(ApplicationError::SchemaParse { path, .. }) => {
                assert!(path.ends_with("host.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_name_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "host.yaml", "rest_endpoint: /x\n");

        let err = YamlSchemaSource::new(dir.path()).load_all().unwrap_err();
        assert!(err.to_string().contains("host.yaml"));
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let source = YamlSchemaSource::new(dir.path().join("absent"));
        assert!(source.load_all().is_err());
    }
}
