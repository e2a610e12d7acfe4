//! CLI command implementations

pub mod bar;
pub mod completions;
pub mod config;
pub mod foo;
