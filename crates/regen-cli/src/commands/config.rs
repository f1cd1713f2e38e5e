//! `regen config`: inspect the effective configuration.

use crate::{
    cli::{ConfigCommands, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config
                .get(&key)?
                .ok_or(CliError::UnknownConfigKey { key })?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            output.print(&config.to_toml()?)?;
        }

        ConfigCommands::Path => {
            let path = AppConfig::config_path(global.config.as_ref());
            let suffix = if path.exists() { "" } else { " (not found, using defaults)" };
            output.print(&format!("{}{suffix}", path.display()))?;
        }
    }

    Ok(())
}
