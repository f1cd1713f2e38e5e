//! Log output for a generation run.
//!
//! Events go to stderr so `regen list --format json` stays clean on stdout.
//! Each `-v` unlocks the next layer of what a run reports:
//!
//! | Flag    | Shows                                                     |
//! |---------|-----------------------------------------------------------|
//! | `-q`    | errors only                                               |
//! | (none)  | warnings, e.g. sections skipped during a merge            |
//! | `-v`    | one line per entity, then the run totals                  |
//! | `-vv`   | each destination and its merge strategy, schemas parsed,  |
//! |         | templates loaded                                          |
//! | `-vvv`  | render spans with timings, output sizes, emitting module  |
//!
//! `RUST_LOG` replaces the mapping entirely.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// How much of a run is reported on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Warnings,
    Progress,
    Decisions,
    Render,
}

impl Verbosity {
    pub fn from_args(args: &GlobalArgs) -> Self {
        if args.quiet {
            return Self::Quiet;
        }
        match args.verbose {
            0 => Self::Warnings,
            1 => Self::Progress,
            2 => Self::Decisions,
            _ => Self::Render,
        }
    }

    /// Filter directives. Third-party crates stay at `warn` at every level.
    fn directives(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Warnings => "warn",
            Self::Progress => "warn,regen=info,regen_core=info",
            Self::Decisions => "warn,regen=debug,regen_core=debug,regen_adapters=debug",
            Self::Render => "warn,regen=trace,regen_core=trace,regen_adapters=trace",
        }
    }

    /// Error reports include the full cause chain from `-v` up.
    pub fn shows_causes(self) -> bool {
        self >= Self::Progress
    }
}

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<Verbosity> {
    let verbosity = Verbosity::from_args(args);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directives()));
    let ansi = !args.no_color && std::io::stderr().is_terminal();

    // Below -vvv a line is a message and its fields; timestamps and module
    // paths only help when reading render spans.
    let (brief, detailed) = if verbosity == Verbosity::Render {
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(ansi)
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_ansi(ansi)
            .with_target(false)
            .with_writer(std::io::stderr);
        (Some(layer), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(brief)
        .with(detailed)
        .try_init()
        .context("a tracing subscriber is already installed")?;

    Ok(verbosity)
}
