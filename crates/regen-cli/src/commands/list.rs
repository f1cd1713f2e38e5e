//! Implementation of the `regen list` command.

use serde::Serialize;

use regen_core::domain::{Entity, PlannedFile};

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// One row of `regen list` output.
#[derive(Debug, Serialize)]
struct EntitySummary {
    name: String,
    attributes: usize,
    files: Vec<String>,
}

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = super::build_service(&config.generator);
    let entities = service
        .load_entities()
        .with_cli_context(|| "loading entity definitions")?;
    let planned = service
        .plan_files(&config.generator.plan(), &entities)
        .with_cli_context(|| "planning destinations")?;
    let summaries = summarize(&entities, &planned);

    match args.format {
        ListFormat::Table => {
            output.header(&format!(
                "Entities in {}:",
                config.generator.definitions_dir.display()
            ))?;
            for summary in &summaries {
                output.print(&format!(
                    "  {:<32} {:>3} attributes  {:>2} files",
                    summary.name,
                    summary.attributes,
                    summary.files.len()
                ))?;
                if args.files {
                    for file in &summary.files {
                        output.print(&format!("      {file}"))?;
                    }
                }
            }
        }
        ListFormat::Json => {
            // Bypasses OutputManager so JSON stays parseable in pipes.
            let json = serde_json::to_string_pretty(&summaries).map_err(|e| {
                CliError::InvalidInput {
                    message: format!("failed to serialize entity list: {e}"),
                }
            })?;
            println!("{json}");
        }
        ListFormat::List => {
            for summary in &summaries {
                println!("{}", summary.name);
            }
        }
    }

    Ok(())
}

/// Attach each entity's planned destinations, keeping load order.
fn summarize(entities: &[Entity], planned: &[PlannedFile]) -> Vec<EntitySummary> {
    entities
        .iter()
        .map(|entity| EntitySummary {
            name: entity.name.clone(),
            attributes: entity.attributes.len(),
            files: planned
                .iter()
                .filter(|f| f.subject == entity.name)
                .map(|f| f.destination.display().to_string())
                .collect(),
        })
        .collect()
}
