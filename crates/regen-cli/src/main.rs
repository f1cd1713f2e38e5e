//! `regen`: render entity schemas through templates and merge the results
//! into the working tree without touching hand-written code.
//!
//! Exit codes are listed on [`CliError::exit_code`].

use std::io::IsTerminal as _;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version arrive here too and go to stdout.
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let verbosity = match logging::init_logging(&cli.global) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("regen: {e:#}");
            return ExitCode::from(1);
        }
    };
    debug!(?verbosity, command = ?cli.command, "regen starting");

    let show_causes = verbosity.shows_causes();
    let color = !cli.global.no_color && std::io::stderr().is_terminal();

    match load_config(&cli).and_then(|config| run(cli, config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e, show_causes, color),
    }
}

/// `init` writes the config file, so it starts from the defaults instead of
/// requiring the file to exist.
fn load_config(cli: &Cli) -> CliResult<AppConfig> {
    match cli.command {
        Commands::Init(_) => Ok(AppConfig::default()),
        _ => AppConfig::load(cli.global.config.as_ref()),
    }
}

fn run(cli: Cli, config: AppConfig) -> CliResult<()> {
    let output = OutputManager::new(&cli.global, &config);
    match cli.command {
        Commands::Generate(cmd) => commands::generate::execute(cmd, config, output),
        Commands::List(cmd) => commands::list::execute(cmd, config, output),
        Commands::Init(cmd) => commands::init::execute(cmd, cli.global, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.global, config, output),
    }
}

fn report(err: &CliError, show_causes: bool, color: bool) -> ExitCode {
    err.log();
    let msg = if color {
        err.format_colored(show_causes)
    } else {
        err.format_plain(show_causes)
    };
    eprint!("{msg}");
    ExitCode::from(err.exit_code())
}
