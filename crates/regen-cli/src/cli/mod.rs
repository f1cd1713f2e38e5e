//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "regen",
    bin_name = "regen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Schema-driven code generation that keeps your hand edits",
    long_about = "regen renders every entity definition through a family of \
                  templates and merges the result into existing files, \
                  replacing only the marked //template:begin ... //template:end \
                  sections.",
    after_help = "EXAMPLES:\n\
        \x20 regen init\n\
        \x20 regen generate\n\
        \x20 regen generate --dry-run\n\
        \x20 regen list --format json\n\
        \x20 regen completions bash > /usr/share/bash-completion/completions/regen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Regenerate every output for every entity.
    #[command(
        visible_alias = "gen",
        about = "Render all entities and merge into existing files",
        after_help = "EXAMPLES:\n\
            \x20 regen generate\n\
            \x20 regen generate --dry-run\n\
            \x20 regen -c ci/regen.toml generate"
    )]
    Generate(GenerateArgs),

    /// List loaded entities and their destinations.
    #[command(
        visible_alias = "ls",
        about = "List entities and the files they produce",
        after_help = "EXAMPLES:\n\
            \x20 regen list\n\
            \x20 regen list --files\n\
            \x20 regen list --format json"
    )]
    List(ListArgs),

    /// Write the default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 regen init           # writes ./regen.toml\n\
            \x20 regen init --force   # overwrite an existing file\n\
            \x20 regen -c gen/regen.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 regen completions bash > ~/.local/share/bash-completion/completions/regen\n\
            \x20 regen completions zsh  > ~/.zfunc/_regen\n\
            \x20 regen completions fish > ~/.config/fish/completions/regen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the effective configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 regen config get generator.definitions_dir\n\
            \x20 regen config list\n\
            \x20 regen config path"
    )]
    Config(ConfigCommands),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `regen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Print destinations without rendering or writing anything.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `regen list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Include every destination per entity.
    #[arg(long = "files", help = "Show destination files for each entity")]
    pub files: bool,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One name per line.
    List,
    /// JSON array.
    Json,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `regen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `regen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `regen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `generator.definitions_dir`.
        key: String,
    },
    /// Print the whole effective configuration as TOML.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
