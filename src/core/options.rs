//! Group-level option peeling
//!
//! Options declared on the group itself may come before the subcommand name
//! (`prog --verbose build`). Before deciding which command a token names, the
//! resolver lets a [`GroupOptionParser`] consume the leading group options.
//! Anything the group does not recognize is left alone, because it may belong
//! to the default command.

use clap::{ArgAction, Command};

/// Recognizes the options declared on a group
pub trait GroupOptionParser {
    /// Number of leading tokens that are group options (and their values)
    fn consumed(&self, args: &[String]) -> usize;

    /// Split `args` into the leading group options and the rest
    fn peel<'a>(&self, args: &'a [String]) -> (&'a [String], &'a [String]) {
        args.split_at(self.consumed(args).min(args.len()))
    }

    /// Whether `c` is a group short flag that takes no value
    fn is_flag_short(&self, _c: char) -> bool {
        false
    }
}

/// One option declared on the group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOption {
    pub longs: Vec<String>,
    pub shorts: Vec<char>,
    pub takes_value: bool,
    /// A value must be attached with `=`; a separate token is never taken
    pub require_equals: bool,
    /// Fewest values taken from the following tokens
    pub min_values: usize,
    /// Most values taken from the following tokens (`usize::MAX` if unbounded)
    pub max_values: usize,
}

impl GroupOption {
    /// Number of following tokens taken as values when none is attached
    fn separate_values(&self, following: &[String]) -> usize {
        if !self.takes_value || self.require_equals {
            return 0;
        }
        // An unbounded option would swallow the command name
        let wanted = if self.max_values == usize::MAX {
            self.min_values.max(1)
        } else {
            self.max_values
        };
        following
            .iter()
            .take(wanted)
            .enumerate()
            .take_while(|(i, token)| *i < self.min_values || !token.starts_with('-'))
            .count()
    }
}

/// A set of group options, declared by hand or read from a clap command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOptions {
    options: Vec<GroupOption>,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a boolean flag, e.g. `flag("verbose", Some('v'))`
    pub fn flag(self, long: &str, short: Option<char>) -> Self {
        self.push(long, short, false)
    }

    /// Declare an option that takes a value, e.g. `option("color", None)`
    pub fn option(self, long: &str, short: Option<char>) -> Self {
        self.push(long, short, true)
    }

    /// Declare an option whose value must be attached, e.g. `--color=never`
    pub fn equals_option(mut self, long: &str, short: Option<char>) -> Self {
        self = self.push(long, short, true);
        if let Some(opt) = self.options.last_mut() {
            opt.require_equals = true;
            opt.min_values = 0;
        }
        self
    }

    fn push(mut self, long: &str, short: Option<char>, takes_value: bool) -> Self {
        let values = usize::from(takes_value);
        self.options.push(GroupOption {
            longs: vec![long.trim_start_matches('-').to_string()],
            shorts: short.into_iter().collect(),
            takes_value,
            require_equals: false,
            min_values: values,
            max_values: values,
        });
        self
    }

    /// Collect the named options of a clap command
    ///
    /// Positionals are skipped, as are help and version flags: those are
    /// classified as help requests, not peeled.
    pub fn from_command(command: &Command) -> Self {
        let options = command
            .get_arguments()
            .filter(|arg| !arg.is_positional())
            .filter(|arg| {
                !matches!(
                    arg.get_action(),
                    ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
                )
            })
            .map(|arg| {
                let takes_value = arg.get_action().takes_values();
                let (min_values, max_values) = match arg.get_num_args() {
                    Some(range) if takes_value => (range.min_values(), range.max_values()),
                    _ => (usize::from(takes_value), usize::from(takes_value)),
                };
                GroupOption {
                    longs: arg
                        .get_long_and_visible_aliases()
                        .unwrap_or_default()
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    shorts: arg.get_short_and_visible_aliases().unwrap_or_default(),
                    takes_value,
                    require_equals: arg.is_require_equals_set(),
                    min_values,
                    max_values,
                }
            })
            .collect();

        Self { options }
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    fn find_long(&self, name: &str) -> Option<&GroupOption> {
        self.options
            .iter()
            .find(|opt| opt.longs.iter().any(|l| l == name))
    }

    fn find_short(&self, c: char) -> Option<&GroupOption> {
        self.options.iter().find(|opt| opt.shorts.contains(&c))
    }

    /// Width in tokens of the group option starting at `args[0]`, if it is one
    fn token_width(&self, args: &[String]) -> Option<usize> {
        let (token, following) = args.split_first()?;
        if token == "--" || token == "-" || !token.starts_with('-') {
            return None;
        }

        if let Some(long) = token.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            let opt = self.find_long(name)?;
            if inline_value {
                return Some(1);
            }
            return Some(1 + opt.separate_values(following));
        }

        let cluster = &token[1..];
        for (idx, c) in cluster.char_indices() {
            let opt = self.find_short(c)?;
            if opt.takes_value {
                let rest = &cluster[idx + c.len_utf8()..];
                if !rest.is_empty() {
                    return Some(1);
                }
                return Some(1 + opt.separate_values(following));
            }
        }
        Some(1)
    }
}

impl GroupOptionParser for GroupOptions {
    fn consumed(&self, args: &[String]) -> usize {
        let mut i = 0;
        while i < args.len() {
            match self.token_width(&args[i..]) {
                Some(width) => {
                    tracing::trace!(option = %args[i], width, "peeled group option");
                    i += width;
                }
                None => break,
            }
        }
        i.min(args.len())
    }

    fn is_flag_short(&self, c: char) -> bool {
        self.find_short(c).is_some_and(|opt| !opt.takes_value)
    }
}
