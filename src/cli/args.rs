//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    completions::CompletionsArgs, config::ConfigCommands, foo::FooArgs,
};

/// Binary name, also the prefix of its environment variables
pub const APP: &str = "dgroup";

/// Command run when no subcommand is named, unless configured otherwise
pub const DEFAULT_COMMAND: &str = "foo";

#[derive(Parser, Debug)]
#[command(name = "dgroup")]
#[command(version, about = "Command group with a default subcommand")]
#[command(long_about = "A command group that runs its default subcommand when no subcommand name is given.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,

    /// Print a notice from the group before dispatching
    #[arg(long)]
    pub group_only: bool,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the --foo value and any extra argument
    Foo(FooArgs),

    /// Print "bar"
    Bar,

    /// Inspect the group configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML format (full fidelity)
    #[default]
    Yaml,
    /// JSON format (for programming)
    Json,
}
