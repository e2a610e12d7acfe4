//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::group::{ConfigError, GroupConfig, UnknownOptionsPolicy};

/// Group settings read from files and the environment
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default command name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Run the default command when no arguments are given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_if_no_args: Option<bool>,

    /// Marker appended to the default command in help output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mark: Option<String>,

    /// Unknown-options policy; only `ignore` is valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unknown_options: Option<UnknownOptionsPolicy>,
}

impl Config {
    /// Load configuration for `app` from all sources, merging in priority order
    ///
    /// 1. Built-in defaults
    /// 2. Global user config (`<config dir>/<app>/config.yaml`)
    /// 3. File named by `<APP>_CONFIG`
    /// 4. `<APP>_DEFAULT`, `<APP>_DEFAULT_IF_NO_ARGS`, `<APP>_MARK`
    pub fn load(app: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let prefix = env_prefix(app);

        if let Some(global_path) = Self::global_config_path(app) {
            if global_path.exists() {
                config.merge(Self::from_file(&global_path)?);
            }
        }

        if let Ok(path) = std::env::var(format!("{prefix}_CONFIG")) {
            let path = PathBuf::from(path);
            if path.exists() {
                config.merge(Self::from_file(&path)?);
            }
        }

        config.merge(Self::from_env(&prefix)?);
        Ok(config)
    }

    /// Get the path to the global config file
    pub fn global_config_path(app: &str) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", app)
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Read a YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|e| match e {
            ConfigError::Yaml { message, .. } => ConfigError::Yaml {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })
    }

    /// Parse YAML config text
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yml::from_str(contents).map_err(|e| ConfigError::Yaml {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(default) = std::env::var(format!("{prefix}_DEFAULT")) {
            if !default.is_empty() {
                config.default = Some(default);
            }
        }
        let var = format!("{prefix}_DEFAULT_IF_NO_ARGS");
        if let Ok(value) = std::env::var(&var) {
            config.default_if_no_args = Some(parse_bool(&var, &value)?);
        }
        if let Ok(mark) = std::env::var(format!("{prefix}_MARK")) {
            config.mark = Some(mark);
        }

        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default.is_some() {
            self.default = other.default;
        }
        if other.default_if_no_args.is_some() {
            self.default_if_no_args = other.default_if_no_args;
        }
        if other.mark.is_some() {
            self.mark = other.mark;
        }
        if other.unknown_options.is_some() {
            self.unknown_options = other.unknown_options;
        }
    }

    /// Build a validated group configuration
    ///
    /// `fallback_default` is used when no layer names a default command.
    pub fn group_config(&self, fallback_default: Option<&str>) -> Result<GroupConfig, ConfigError> {
        let mut builder = GroupConfig::builder()
            .invoke_default_when_no_args(self.default_if_no_args.unwrap_or(true))
            .unknown_options(self.unknown_options.unwrap_or_default());

        if let Some(default) = self.default.as_deref().or(fallback_default) {
            builder = builder.default_command(default);
        }
        if let Some(ref mark) = self.mark {
            builder = builder.mark(mark.clone());
        }

        builder.build()
    }
}

/// `my-app` becomes `MY_APP`
fn env_prefix(app: &str) -> String {
    app.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value: value.to_string(),
        }),
    }
}
