//! CLI module - clap integration and the `dgroup` command definitions

pub mod args;
pub mod commands;
pub mod group;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat, APP, DEFAULT_COMMAND};
pub use group::DefaultGroup;
