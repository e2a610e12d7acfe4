//! Read-only view of the subcommands a group knows about

use std::collections::{BTreeMap, HashMap};

/// Lookup of registered subcommands by exact, case-sensitive name
pub trait CommandRegistry {
    /// Whatever the dispatcher stores per command
    type Handle;

    fn get_command(&self, name: &str) -> Option<&Self::Handle>;

    fn has_command(&self, name: &str) -> bool {
        self.get_command(name).is_some()
    }
}

/// A clap command's subcommands, matched by name or alias
impl CommandRegistry for clap::Command {
    type Handle = clap::Command;

    fn get_command(&self, name: &str) -> Option<&clap::Command> {
        self.find_subcommand(name)
    }
}

impl<H> CommandRegistry for BTreeMap<String, H> {
    type Handle = H;

    fn get_command(&self, name: &str) -> Option<&H> {
        self.get(name)
    }
}

impl<H> CommandRegistry for HashMap<String, H> {
    type Handle = H;

    fn get_command(&self, name: &str) -> Option<&H> {
        self.get(name)
    }
}
