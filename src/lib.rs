//! Default subcommands for clap command groups
//!
//! A group may name one of its subcommands as the default. Invoking the
//! program without an explicit subcommand name routes to it, and leading
//! tokens that name no subcommand become the default command's arguments:
//!
//! ```text
//! prog                 ->  prog foo          (when invoking on no args)
//! prog --foo x         ->  prog foo --foo x
//! prog bar             ->  prog bar
//! prog --verbose       ->  prog --verbose foo
//! ```
//!
//! [`core`] holds the framework-independent resolver and help annotator;
//! [`cli::DefaultGroup`] wires them into a `clap::Command`.

pub mod cli;
pub mod core;

pub use crate::cli::DefaultGroup;
pub use crate::core::{
    ConfigError, GroupConfig, HelpAnnotator, HelpEntry, Resolution, Resolver, Route,
};
