//! Default subcommand resolution
//!
//! Decides which subcommand an argument list names and how to reshape the
//! list so the dispatcher's normal parse invokes it. Unmatched leading
//! tokens become arguments of the default command, so `prog value` means
//! `prog <default> value`. An exact command name always wins.

use std::fmt;

use crate::core::group::GroupConfig;
use crate::core::options::GroupOptionParser;
use crate::core::registry::CommandRegistry;

/// How a command was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The first non-group token named a registered command
    Explicit,
    /// The default command was substituted
    Default,
    /// Nothing to resolve; the arguments go to the dispatcher untouched
    PassThrough,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Explicit => write!(f, "explicit"),
            Route::Default => write!(f, "default"),
            Route::PassThrough => write!(f, "pass-through"),
        }
    }
}

/// The outcome of one resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub route: Route,
    /// Leading group options, kept ahead of the command name
    pub group_args: Vec<String>,
    /// Effective command name; `None` on pass-through
    pub command: Option<String>,
    /// Arguments for the command (the whole input on pass-through)
    pub args: Vec<String>,
}

impl Resolution {
    fn pass_through(args: &[String]) -> Self {
        Self {
            route: Route::PassThrough,
            group_args: Vec::new(),
            command: None,
            args: args.to_vec(),
        }
    }

    fn routed(route: Route, group_args: &[String], command: &str, args: &[String]) -> Self {
        Self {
            route,
            group_args: group_args.to_vec(),
            command: Some(command.to_string()),
            args: args.to_vec(),
        }
    }

    pub fn command(&self) -> Option<&str> {
        self.command.as_deref()
    }

    pub fn is_pass_through(&self) -> bool {
        self.route == Route::PassThrough
    }

    /// Flatten back into an argument list: group options, command, its args
    pub fn into_args(self) -> Vec<String> {
        let mut out = self.group_args;
        out.extend(self.command);
        out.extend(self.args);
        out
    }
}

/// Resolves argument lists against a registry and a group configuration
pub struct Resolver<'a, R: ?Sized, P: ?Sized> {
    registry: &'a R,
    options: &'a P,
    config: &'a GroupConfig,
}

impl<'a, R, P> Resolver<'a, R, P>
where
    R: CommandRegistry + ?Sized,
    P: GroupOptionParser + ?Sized,
{
    pub fn new(registry: &'a R, options: &'a P, config: &'a GroupConfig) -> Self {
        Self {
            registry,
            options,
            config,
        }
    }

    /// Resolve `args` (without the program name)
    pub fn resolve(&self, args: &[String]) -> Resolution {
        let resolution = self.classify(args);

        if resolution.route == Route::Default {
            if let Some(name) = resolution.command() {
                if !self.registry.has_command(name) {
                    tracing::warn!(default = %name, "default command is not registered");
                }
            }
        }
        tracing::debug!(
            route = %resolution.route,
            command = ?resolution.command,
            args = ?resolution.args,
            "resolved subcommand"
        );

        resolution
    }

    fn classify(&self, args: &[String]) -> Resolution {
        let default = self.config.default_name();

        if args.is_empty() {
            return match default {
                Some(name) if self.config.invoke_default_when_no_args() => {
                    Resolution::routed(Route::Default, &[], name, &[])
                }
                _ => Resolution::pass_through(args),
            };
        }

        let (group_args, rest) = self.options.peel(args);

        let Some(first) = rest.first() else {
            // Only group options were given
            return match default {
                Some(name) => Resolution::routed(Route::Default, group_args, name, &[]),
                None => Resolution::pass_through(args),
            };
        };

        if self.registry.has_command(first) {
            return Resolution::routed(Route::Explicit, group_args, first, &rest[1..]);
        }

        if self.is_help_request(first) {
            return Resolution::pass_through(args);
        }

        match default {
            Some(name) => Resolution::routed(Route::Default, group_args, name, rest),
            // No default: let the dispatcher report the unknown token itself
            None => Resolution::pass_through(args),
        }
    }

    /// A help flag, or a short cluster of group flags containing a help short (`-vh`)
    fn is_help_request(&self, token: &str) -> bool {
        if self.config.is_help_flag(token) {
            return true;
        }
        let Some(cluster) = token.strip_prefix('-') else {
            return false;
        };
        if cluster.is_empty() || cluster.starts_with('-') {
            return false;
        }
        for c in cluster.chars() {
            if self.config.is_help_flag(&format!("-{c}")) {
                return true;
            }
            if !self.options.is_flag_short(c) {
                return false;
            }
        }
        false
    }
}
