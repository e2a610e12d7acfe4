//! Core module - resolution, help annotation and configuration

pub mod config;
pub mod group;
pub mod help;
pub mod options;
pub mod registry;
pub mod resolver;

pub use config::Config;
pub use group::{
    ConfigError, GroupConfig, GroupConfigBuilder, UnknownOptionsPolicy, DEFAULT_HELP_FLAGS,
    DEFAULT_MARK,
};
pub use help::{render_commands, HelpAnnotator, HelpEntry};
pub use options::{GroupOption, GroupOptionParser, GroupOptions};
pub use registry::CommandRegistry;
pub use resolver::{Resolution, Resolver, Route};
