//! clap integration: a command group with a default subcommand

use std::ffi::OsString;

use clap::{ArgAction, ArgMatches, Command};

use crate::core::group::{ConfigError, GroupConfig};
use crate::core::help::{render_commands, HelpAnnotator, HelpEntry};
use crate::core::options::{GroupOptionParser, GroupOptions};
use crate::core::resolver::{Resolution, Resolver, Route};

/// Peels group options only from the leading UTF-8 tokens
struct Utf8Prefix {
    options: GroupOptions,
    len: usize,
}

impl GroupOptionParser for Utf8Prefix {
    fn consumed(&self, args: &[String]) -> usize {
        self.options.consumed(&args[..self.len.min(args.len())])
    }

    fn is_flag_short(&self, c: char) -> bool {
        self.options.is_flag_short(c)
    }
}

/// A `clap::Command` whose subcommands include a default
///
/// Arguments are resolved before clap sees them: the argument list is
/// rewritten so the default command is named explicitly, and clap then
/// parses it as usual. Top-level help lists the default command first,
/// marked.
#[derive(Debug, Clone)]
pub struct DefaultGroup {
    command: Command,
    config: GroupConfig,
}

impl DefaultGroup {
    /// Wrap `command`
    ///
    /// clap's `help` subcommand is disabled, so a bare `help` token is an
    /// ordinary argument. clap's help and version flags join the configured
    /// help flags.
    pub fn new(command: Command, mut config: GroupConfig) -> Self {
        let command = command.disable_help_subcommand(true);

        if !command.is_disable_help_flag_set() {
            config.push_help_flag("-h");
            config.push_help_flag("--help");
        }
        let has_version = command.get_version().is_some() || command.get_long_version().is_some();
        if has_version && !command.is_disable_version_flag_set() {
            config.push_help_flag("-V");
            config.push_help_flag("--version");
        }
        for arg in command.get_arguments() {
            if matches!(
                arg.get_action(),
                ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
            ) {
                if let Some(long) = arg.get_long() {
                    config.push_help_flag(format!("--{long}"));
                }
                if let Some(short) = arg.get_short() {
                    config.push_help_flag(format!("-{short}"));
                }
            }
        }

        Self { command, config }
    }

    pub fn command(&self) -> &Command {
        &self.command
    }

    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    /// Register a subcommand
    pub fn add_command(&mut self, subcommand: Command) {
        let command = std::mem::take(&mut self.command);
        self.command = command.subcommand(subcommand);
    }

    /// Name the default command; it may be registered later
    pub fn set_default(&mut self, name: impl Into<String>) -> Result<(), ConfigError> {
        self.config.set_default(name)
    }

    /// Register a subcommand and make it the default
    pub fn set_default_command(&mut self, subcommand: Command) -> Result<(), ConfigError> {
        self.config.set_default(subcommand.get_name())?;
        self.add_command(subcommand);
        Ok(())
    }

    /// Resolve arguments (without the program name)
    pub fn resolve(&self, args: &[String]) -> Resolution {
        let options = GroupOptions::from_command(&self.command);
        Resolver::new(&self.command, &options, &self.config).resolve(args)
    }

    /// Visible subcommands in declaration order
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        self.command
            .get_subcommands()
            .filter(|sub| !sub.is_hide_set())
            .map(|sub| {
                let summary = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
                HelpEntry::new(sub.get_name(), summary)
            })
            .collect()
    }

    /// The wrapped command with the annotated command list in its help
    ///
    /// Only the command list is rendered here. Subcommands are hidden from
    /// clap's own listing, and `{all-args}` renders the arguments and options
    /// under their headings.
    pub fn annotated_command(&self) -> Command {
        let entries = self.help_entries();
        if entries.is_empty() {
            return self.command.clone();
        }

        let annotated = HelpAnnotator::new(self.config.mark())
            .annotate(entries, self.config.default_name());
        let heading = self
            .command
            .get_subcommand_help_heading()
            .unwrap_or("Commands");

        // Hidden subcommands drop out of the usage line, so keep clap's own
        let usage = self.command.clone().render_usage().to_string();
        let usage = usage
            .strip_prefix("Usage:")
            .unwrap_or(&usage)
            .trim()
            .to_string();

        let mut template = String::from("{before-help}{about-with-newline}\n{usage-heading} {usage}\n\n");
        template.push_str(&format!("{heading}:\n"));
        template.push_str(&render_commands(&annotated));
        template.push_str("\n{all-args}{after-help}");

        self.command
            .clone()
            .override_usage(usage)
            .mut_subcommands(|sub| sub.hide(true))
            .help_template(template)
    }

    /// Top-level help text, as `--help` prints it
    pub fn render_help(&self) -> String {
        self.annotated_command().render_help().to_string()
    }

    /// Rewrite `args` (without the program name) so the chosen command is named
    ///
    /// Tokens are passed through as given. Resolution reads their UTF-8
    /// form, and group options are only peeled up to the first token that
    /// is not valid UTF-8.
    pub fn reshape(&self, args: Vec<OsString>) -> Vec<OsString> {
        let view: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let options = Utf8Prefix {
            options: GroupOptions::from_command(&self.command),
            len: args.iter().take_while(|a| a.to_str().is_some()).count(),
        };
        let resolution = Resolver::new(&self.command, &options, &self.config).resolve(&view);

        match (resolution.route, resolution.command) {
            (Route::Default, Some(name)) => {
                let mut out = args;
                let rest = out.split_off(resolution.group_args.len());
                out.push(name.into());
                out.extend(rest);
                out
            }
            // Explicit and pass-through keep the original order
            _ => args,
        }
    }

    /// Resolve and parse `itr`, whose first item is the program name
    pub fn try_get_matches_from<I, T>(&self, itr: I) -> Result<ArgMatches, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut argv = itr.into_iter().map(Into::<OsString>::into);
        let bin = argv
            .next()
            .unwrap_or_else(|| OsString::from(self.command.get_name()));
        let args: Vec<OsString> = argv.collect();

        let mut full = Vec::with_capacity(args.len() + 2);
        full.push(bin);
        full.extend(self.reshape(args));

        self.annotated_command().try_get_matches_from(full)
    }

    /// Like [`Self::try_get_matches_from`], exiting on error the way clap does
    pub fn get_matches_from<I, T>(&self, itr: I) -> ArgMatches
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.try_get_matches_from(itr).unwrap_or_else(|e| e.exit())
    }

    /// Parse the process arguments
    pub fn get_matches(&self) -> ArgMatches {
        self.get_matches_from(std::env::args_os())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::Arg;

    fn foo() -> Command {
        Command::new("foo")
            .about("Print the --foo value")
            .arg(Arg::new("foo").long("foo").default_value("foo"))
    }

    fn cli() -> Command {
        Command::new("cli")
            .arg_required_else_help(true)
            .subcommand_required(true)
            .arg(
                Arg::new("group-only")
                    .long("group-only")
                    .action(ArgAction::SetTrue),
            )
            .subcommand(foo())
            .subcommand(Command::new("bar").about("Print bar"))
    }

    fn group(invoke_when_empty: bool) -> DefaultGroup {
        let config = GroupConfig::builder()
            .default_command("foo")
            .invoke_default_when_no_args(invoke_when_empty)
            .build()
            .unwrap();
        DefaultGroup::new(cli(), config)
    }

    fn sub_value(matches: &ArgMatches, name: &str, arg: &str) -> Option<String> {
        matches
            .subcommand_matches(name)
            .and_then(|m| m.get_one::<String>(arg).cloned())
    }

    #[test]
    fn test_default_command_with_arguments() {
        let matches = group(true)
            .try_get_matches_from(["cli", "--foo", "foooo"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("foo"));
        assert_eq!(sub_value(&matches, "foo", "foo").as_deref(), Some("foooo"));
    }

    #[test]
    fn test_unknown_option_is_reported_by_default_command() {
        let err = group(true).try_get_matches_from(["cli", "-x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_group_option_applied_before_default() {
        let matches = group(true)
            .try_get_matches_from(["cli", "--group-only"])
            .unwrap();
        assert!(matches.get_flag("group-only"));
        assert_eq!(matches.subcommand_name(), Some("foo"));
    }

    #[test]
    fn test_group_option_only_runs_default_when_empty_input_does_not() {
        let matches = group(false)
            .try_get_matches_from(["cli", "--group-only"])
            .unwrap();
        assert!(matches.get_flag("group-only"));
        assert_eq!(matches.subcommand_name(), Some("foo"));
    }

    #[test]
    fn test_equals_only_group_option_does_not_take_command_name() {
        let cmd = cli().arg(
            Arg::new("color")
                .long("color")
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("always")
                .action(ArgAction::Set),
        );
        let config = GroupConfig::builder().default_command("foo").build().unwrap();
        let g = DefaultGroup::new(cmd, config);

        let matches = g.try_get_matches_from(["cli", "--color", "bar"]).unwrap();
        assert_eq!(matches.subcommand_name(), Some("bar"));
        assert_eq!(
            matches.get_one::<String>("color").map(String::as_str),
            Some("always")
        );

        let matches = g.try_get_matches_from(["cli", "--color=never"]).unwrap();
        assert_eq!(matches.subcommand_name(), Some("foo"));
    }

    #[test]
    fn test_explicit_commands() {
        let g = group(true);
        let matches = g.try_get_matches_from(["cli", "foo"]).unwrap();
        assert_eq!(sub_value(&matches, "foo", "foo").as_deref(), Some("foo"));

        let matches = g.try_get_matches_from(["cli", "bar"]).unwrap();
        assert_eq!(matches.subcommand_name(), Some("bar"));
    }

    #[test]
    fn test_no_args_invokes_default() {
        let matches = group(true).try_get_matches_from(["cli"]).unwrap();
        assert_eq!(matches.subcommand_name(), Some("foo"));
    }

    #[test]
    fn test_no_args_shows_usage_when_disabled() {
        let err = group(false).try_get_matches_from(["cli"]).unwrap_err();
        assert_eq!(
            err.kind(),
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
        );
    }

    #[test]
    fn test_help_marks_default() {
        let err = group(true).try_get_matches_from(["cli", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);

        let help = err.render().to_string();
        assert!(help.contains("foo*"));
        assert!(!help.contains("bar*"));
        assert!(help.contains("Print bar"));
        assert!(help.contains("--group-only"));
    }

    #[test]
    fn test_help_short_in_group_flag_cluster() {
        let cmd = cli().arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue),
        );
        let config = GroupConfig::builder().default_command("foo").build().unwrap();
        let g = DefaultGroup::new(cmd, config);

        for argv in [["cli", "-vh"], ["cli", "-hv"]] {
            let err = g.try_get_matches_from(argv).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
            assert!(err.render().to_string().contains("foo*"));
        }
    }

    #[test]
    fn test_help_keeps_argument_headings() {
        let cmd = cli()
            .next_help_heading("Output")
            .arg(Arg::new("color").long("color").help("When to use color"));
        let config = GroupConfig::builder().default_command("foo").build().unwrap();
        let help = DefaultGroup::new(cmd, config).render_help();

        assert!(help.contains("Usage: cli [OPTIONS] <COMMAND>"));
        assert!(help.contains("Output:"));
        assert!(help.contains("When to use color"));
        assert_eq!(help.matches("Print bar").count(), 1);
    }

    #[test]
    fn test_rendered_help_lists_default_first() {
        let mut g = group(true);
        g.add_command(Command::new("baz").about("Print baz"));
        let help = g.render_help();

        let foo = help.find("foo*").unwrap();
        let bar = help.find("bar ").unwrap();
        let baz = help.find("baz").unwrap();
        assert!(foo < bar && bar < baz);
    }

    #[test]
    fn test_set_default_late_binding() {
        let mut g = DefaultGroup::new(
            Command::new("cli").subcommand(Command::new("bar")),
            GroupConfig::default(),
        );
        g.set_default("late").unwrap();
        g.add_command(Command::new("late").arg(Arg::new("value")));

        let matches = g.try_get_matches_from(["cli", "hello"]).unwrap();
        let late = matches.subcommand_matches("late").unwrap();
        assert_eq!(late.get_one::<String>("value").map(String::as_str), Some("hello"));
    }

    #[test]
    fn test_set_default_command_registers_and_binds() {
        let mut g = DefaultGroup::new(Command::new("cli"), GroupConfig::default());
        g.set_default_command(foo()).unwrap();
        assert_eq!(g.config().default_name(), Some("foo"));
        assert!(g.command().find_subcommand("foo").is_some());

        let err = g
            .set_default_command(Command::new("bar"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::DefaultAlreadySet { .. }));
        assert!(g.command().find_subcommand("bar").is_none());
    }

    #[test]
    fn test_dangling_default_fails_like_unknown_command() {
        let config = GroupConfig::builder()
            .default_command("missing")
            .build()
            .unwrap();
        let g = DefaultGroup::new(cli(), config);
        let err = g.try_get_matches_from(["cli", "value"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_without_default_unknown_token_is_invalid_subcommand() {
        let g = DefaultGroup::new(cli(), GroupConfig::default());
        let err = g.try_get_matches_from(["cli", "baz"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_bare_help_word_goes_to_default() {
        let mut g = DefaultGroup::new(Command::new("cli"), GroupConfig::default());
        g.set_default_command(Command::new("echo").arg(Arg::new("word")))
            .unwrap();
        let matches = g.try_get_matches_from(["cli", "help"]).unwrap();
        let echo = matches.subcommand_matches("echo").unwrap();
        assert_eq!(echo.get_one::<String>("word").map(String::as_str), Some("help"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_reaches_default_unchanged() {
        use std::os::unix::ffi::OsStringExt;

        let mut g = DefaultGroup::new(Command::new("cli"), GroupConfig::default());
        g.set_default_command(
            Command::new("echo").arg(Arg::new("word").value_parser(clap::value_parser!(OsString))),
        )
        .unwrap();

        let raw = OsString::from_vec(vec![b'a', 0xFF, b'b']);
        let matches = g
            .try_get_matches_from([OsString::from("cli"), raw.clone()])
            .unwrap();
        let echo = matches.subcommand_matches("echo").unwrap();
        assert_eq!(echo.get_one::<OsString>("word"), Some(&raw));
    }

    #[test]
    fn test_version_flag_passes_through() {
        let g = DefaultGroup::new(cli().version("1.2.3"), GroupConfig::default());
        assert!(g.config().is_help_flag("--version"));
        let err = g.try_get_matches_from(["cli", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
    }
}
