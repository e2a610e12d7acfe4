//! Group configuration and its validation

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Marker appended to the default command's name in help output
pub const DEFAULT_MARK: &str = "*";

/// Flags that request group-level help unless configured otherwise
pub const DEFAULT_HELP_FLAGS: &[&str] = &["-h", "--help"];

/// How a group treats option-like tokens it does not declare itself
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownOptionsPolicy {
    /// Leave unknown options in place so the resolved command can parse them
    #[default]
    Ignore,
    /// Fail on unknown options at the group level
    Reject,
}

impl fmt::Display for UnknownOptionsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownOptionsPolicy::Ignore => write!(f, "ignore"),
            UnknownOptionsPolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Errors raised while configuring a default group
///
/// All of these are fatal at setup time. Resolution itself never fails.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("a default group must accept unknown options (policy was 'reject')")]
    #[diagnostic(
        code(default_group::config::unknown_options),
        help("unknown options may belong to the default command; remove `unknown_options: reject`")
    )]
    RejectsUnknownOptions,

    #[error("default command already set to '{current}', cannot change it to '{requested}'")]
    #[diagnostic(
        code(default_group::config::default_already_set),
        help("a group has exactly one default command; set it once")
    )]
    DefaultAlreadySet { current: String, requested: String },

    #[error("invalid help flag '{0}': flags must start with '-'")]
    #[diagnostic(code(default_group::config::help_flag))]
    InvalidHelpFlag(String),

    #[error("default command mark must not be empty")]
    #[diagnostic(code(default_group::config::mark))]
    EmptyMark,

    #[error("invalid value '{value}' for {var}")]
    #[diagnostic(
        code(default_group::config::env),
        help("use one of: true, false, yes, no, 1, 0")
    )]
    InvalidEnv { var: String, value: String },

    #[error("failed to read config file {path:?}")]
    #[diagnostic(code(default_group::config::read))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {message}")]
    #[diagnostic(code(default_group::config::yaml))]
    Yaml { path: PathBuf, message: String },
}

/// Per-group configuration for default command resolution
///
/// Built through [`GroupConfig::builder`], which rejects any setup that
/// would make the group refuse options meant for the default command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupConfig {
    default_name: Option<String>,
    invoke_default_when_no_args: bool,
    help_flags: Vec<String>,
    mark: String,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            default_name: None,
            invoke_default_when_no_args: false,
            help_flags: DEFAULT_HELP_FLAGS.iter().map(|f| f.to_string()).collect(),
            mark: DEFAULT_MARK.to_string(),
        }
    }
}

impl GroupConfig {
    /// Start building a configuration
    pub fn builder() -> GroupConfigBuilder {
        GroupConfigBuilder::default()
    }

    /// Name of the default command, if one has been set
    pub fn default_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    /// Whether an empty argument list resolves to the default command
    pub fn invoke_default_when_no_args(&self) -> bool {
        self.invoke_default_when_no_args
    }

    /// The unknown-options policy; always [`UnknownOptionsPolicy::Ignore`]
    pub fn unknown_options(&self) -> UnknownOptionsPolicy {
        UnknownOptionsPolicy::Ignore
    }

    pub fn help_flags(&self) -> &[String] {
        &self.help_flags
    }

    pub fn mark(&self) -> &str {
        &self.mark
    }

    /// Check whether a token asks for group-level help
    pub fn is_help_flag(&self, token: &str) -> bool {
        self.help_flags.iter().any(|f| f == token)
    }

    /// Add a help flag, ignoring duplicates
    pub(crate) fn push_help_flag(&mut self, flag: impl Into<String>) {
        let flag = flag.into();
        if !self.is_help_flag(&flag) {
            self.help_flags.push(flag);
        }
    }

    /// Bind the default command name
    ///
    /// The name is not checked against the registry here: the command may be
    /// registered later. A group gets one default; a second call fails.
    pub fn set_default(&mut self, name: impl Into<String>) -> Result<(), ConfigError> {
        let requested = name.into();
        if let Some(current) = &self.default_name {
            return Err(ConfigError::DefaultAlreadySet {
                current: current.clone(),
                requested,
            });
        }
        self.default_name = Some(requested);
        Ok(())
    }
}

/// Builder for [`GroupConfig`]
#[derive(Debug, Default)]
pub struct GroupConfigBuilder {
    default_name: Option<String>,
    invoke_default_when_no_args: bool,
    unknown_options: UnknownOptionsPolicy,
    help_flags: Option<Vec<String>>,
    mark: Option<String>,
}

impl GroupConfigBuilder {
    pub fn default_command(mut self, name: impl Into<String>) -> Self {
        self.default_name = Some(name.into());
        self
    }

    pub fn invoke_default_when_no_args(mut self, yes: bool) -> Self {
        self.invoke_default_when_no_args = yes;
        self
    }

    pub fn unknown_options(mut self, policy: UnknownOptionsPolicy) -> Self {
        self.unknown_options = policy;
        self
    }

    /// Replace the help flag set (default: `-h`, `--help`)
    pub fn help_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.help_flags = Some(flags.into_iter().map(Into::into).collect());
        self
    }

    pub fn mark(mut self, mark: impl Into<String>) -> Self {
        self.mark = Some(mark.into());
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<GroupConfig, ConfigError> {
        if self.unknown_options == UnknownOptionsPolicy::Reject {
            return Err(ConfigError::RejectsUnknownOptions);
        }

        let mut config = GroupConfig {
            default_name: self.default_name,
            invoke_default_when_no_args: self.invoke_default_when_no_args,
            ..GroupConfig::default()
        };

        if let Some(flags) = self.help_flags {
            if let Some(bad) = flags.iter().find(|f| !f.starts_with('-') || f.len() < 2) {
                return Err(ConfigError::InvalidHelpFlag(bad.clone()));
            }
            config.help_flags = flags;
        }

        if let Some(mark) = self.mark {
            if mark.is_empty() {
                return Err(ConfigError::EmptyMark);
            }
            config.mark = mark;
        }

        Ok(config)
    }
}
