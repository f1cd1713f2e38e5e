//! Flags accepted before or after any subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Report more of the run on stderr. See `logging` for what each level adds.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Report more of the run (-v, -vv, -vvv)",
        long_help = "Report more of the run on stderr:
    (none)  - warnings, e.g. sections that could not be merged in
    -v      - every entity, then the run totals
    -vv     - each destination and its merge strategy, schemas, templates
    -vvv    - render spans with timings"
    )]
    pub verbose: u8,

    /// Only errors; the per-file lines and the summary are suppressed too.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Config file. Must exist when given; `./regen.toml` is optional.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        env = "REGEN_CONFIG",
        value_name = "FILE",
        help = "Config file (default: ./regen.toml)"
    )]
    pub config: Option<PathBuf>,
}
