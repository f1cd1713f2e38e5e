//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod generate;
pub mod init;
pub mod list;

use regen_adapters::{FileTemplateStore, LocalFilesystem, TeraRenderer, YamlSchemaSource};
use regen_core::application::GenerateService;

use crate::config::GeneratorConfig;

/// Wire the production adapters for the configured directories.
pub(crate) fn build_service(generator: &GeneratorConfig) -> GenerateService {
    GenerateService::new(
        Box::new(YamlSchemaSource::new(&generator.definitions_dir)),
        Box::new(FileTemplateStore::new(&generator.templates_dir)),
        Box::new(TeraRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
}
