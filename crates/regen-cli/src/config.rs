//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the
//! [`GenerationPlan`] built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables, `REGEN__SECTION__KEY` (e.g.
//!    `REGEN__GENERATOR__DEFINITIONS_DIR`)
//! 2. Config file: `--config <FILE>` (must exist) or `./regen.toml` (optional)
//! 3. Built-in defaults: the provider generator's eight output kinds and
//!    directories, with no vendor infix in file names (`model_<entity>.go`,
//!    not `model_<vendor>_<entity>.go`). Add one through `prefix` if needed.
//!
//! Lists such as `generator.outputs` are replaced as a whole, never merged
//! element by element with the defaults.

use std::path::{Path, PathBuf};

use regen_core::domain::{ArtifactSpec, ChangelogSpec, GenerationPlan, MarkerSyntax, OutputKind};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// File looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "regen.toml";

/// Environment prefix; nested keys are separated by `__`.
const ENV_PREFIX: &str = "REGEN";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// What to generate and where.
    pub generator: GeneratorConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// Inputs and output kinds of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// One YAML schema per entity.
    pub definitions_dir: PathBuf,
    /// Template paths below are relative to this directory.
    pub templates_dir: PathBuf,
    pub outputs: Vec<OutputKind>,
    pub manifest: ArtifactSpec,
    pub changelog: ChangelogSpec,
    pub markers: MarkerSyntax,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let source = |template: &str, prefix: &str, suffix: &str| OutputKind {
            template: template.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            structured: true,
            skip_directive_lines: 1,
        };
        let example = |template: &str, prefix: &str, suffix: &str| OutputKind {
            template: template.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            structured: false,
            skip_directive_lines: 0,
        };

        Self {
            definitions_dir: "gen/definitions".into(),
            templates_dir: "gen/templates".into(),
            outputs: vec![
                source("model.go", "internal/provider/model_", ".go"),
                source("data_source.go", "internal/provider/data_source_", ".go"),
                source("data_source_test.go", "internal/provider/data_source_", "_test.go"),
                source("resource.go", "internal/provider/resource_", ".go"),
                source("resource_test.go", "internal/provider/resource_", "_test.go"),
                example("data-source.tf", "examples/data-sources/", "/data-source.tf"),
                example("resource.tf", "examples/resources/", "/resource.tf"),
                example("import.sh", "examples/resources/", "/import.sh"),
            ],
            manifest: ArtifactSpec {
                template: "provider.go".into(),
                destination: "internal/provider/provider.go".into(),
                structured: true,
                skip_directive_lines: 1,
            },
            changelog: ChangelogSpec {
                source: "CHANGELOG.md".into(),
                artifact: ArtifactSpec {
                    template: "changelog.md.tmpl".into(),
                    destination: "templates/guides/changelog.md.tmpl".into(),
                    structured: false,
                    skip_directive_lines: 0,
                },
            },
            markers: MarkerSyntax::default(),
        }
    }
}

impl GeneratorConfig {
    /// The plan handed to the generate service.
    pub fn plan(&self) -> GenerationPlan {
        GenerationPlan {
            outputs: self.outputs.clone(),
            manifest: self.manifest.clone(),
            changelog: self.changelog.clone(),
            markers: self.markers.clone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// An explicit `config_file` must exist; the default `./regen.toml` is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let path = Self::config_path(config_file);
        let required = config_file.is_some();

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_path()).required(required))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| config_error(&path, e))?;

        settings
            .try_deserialize()
            .map_err(|e| config_error(&path, e))
    }

    /// The file `load` reads: `--config` if given, else `./regen.toml`.
    pub fn config_path(config_file: Option<&PathBuf>) -> PathBuf {
        config_file
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Serialize as a TOML document.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::ConfigError {
            message: "failed to serialize configuration".into(),
            source: Some(Box::new(e)),
        })
    }

    /// Look up a dotted key, rendering the value as TOML.
    ///
    /// Returns `None` if any segment does not exist.
    pub fn get(&self, key: &str) -> CliResult<Option<String>> {
        let root = toml::Value::try_from(self).map_err(|e| CliError::ConfigError {
            message: "failed to serialize configuration".into(),
            source: Some(Box::new(e)),
        })?;

        let mut value = &root;
        for segment in key.split('.') {
            value = match value {
                toml::Value::Table(table) => match table.get(segment) {
                    Some(v) => v,
                    None => return Ok(None),
                },
                toml::Value::Array(items) => {
                    match segment.parse::<usize>().ok().and_then(|i| items.get(i)) {
                        Some(v) => v,
                        None => return Ok(None),
                    }
                }
                _ => return Ok(None),
            };
        }

        Ok(Some(match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }
}

fn config_error(path: &Path, e: ::config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: format!("failed to load {}", path.display()),
        source: Some(Box::new(e)),
    }
}
