//! Implementation of the `regen generate` command.
//!
//! Responsibility: build the service from config, run the batch, and report
//! per-file outcomes. No generation logic lives here.

use tracing::{info, instrument};

use regen_core::{application::GenerationReport, domain::MergeStrategy};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the `regen generate` command.
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = super::build_service(&config.generator);
    let plan = config.generator.plan();

    if args.dry_run {
        let entities = service
            .load_entities()
            .with_cli_context(|| "loading entity definitions")?;
        let files = service
            .plan_files(&plan, &entities)
            .with_cli_context(|| "planning destinations")?;

        output.header(&format!(
            "Dry run: {} entities, {} files",
            entities.len(),
            files.len()
        ))?;
        for file in &files {
            let mode = if file.structured { "merge" } else { "overwrite" };
            output.print(&format!(
                "  {:<9} {}  ({})",
                mode,
                file.destination.display(),
                file.subject
            ))?;
        }
        output.info("Nothing was rendered or written")?;
        return Ok(());
    }

    let report = service
        .generate(&plan)
        .with_cli_context(|| "running generation")?;
    info!(files = report.files.len(), "Generation finished");

    print_report(&report, &output)
}

fn print_report(report: &GenerationReport, output: &OutputManager) -> CliResult<()> {
    for file in report.files.iter().filter(|f| f.changed) {
        let verb = match file.strategy {
            MergeStrategy::Fresh => "created",
            MergeStrategy::Overwrite => "replaced",
            MergeStrategy::Merged => "merged",
        };
        output.print(&format!("  {:<8} {}", verb, file.path.display()))?;
    }

    for (path, section) in report.skipped_sections() {
        output.warning(&format!(
            "section '{section}' is not in {} and was not inserted; add its markers by hand",
            path.display()
        ))?;
    }

    output.success(&format!(
        "{} entities, {} files ({} changed, {} unchanged)",
        report.entities.len(),
        report.files.len(),
        report.changed_count(),
        report.files.len() - report.changed_count(),
    ))?;
    Ok(())
}
