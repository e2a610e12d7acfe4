//! `dgroup config` command - Configuration inspection
//!
//! Shows the group configuration as resolved from files and environment.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::{DefaultGroup, OutputFormat, APP};
use crate::core::{Config, UnknownOptionsPolicy};

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective group configuration
    Show(ShowArgs),

    /// Show the path of the global configuration file
    Path,

    /// List all available configuration keys
    Keys,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Output format
    #[arg(long, short = 'f', default_value = "yaml")]
    pub format: OutputFormat,
}

/// Valid configuration keys
const VALID_KEYS: &[(&str, &str)] = &[
    ("default", "Name of the default command"),
    (
        "default_if_no_args",
        "Run the default command when no arguments are given",
    ),
    ("mark", "Marker appended to the default command in help"),
    ("unknown_options", "Unknown option policy (only 'ignore')"),
];

/// What `config show` prints: layered settings after validation
#[derive(Debug, Serialize)]
struct EffectiveConfig<'a> {
    default: Option<&'a str>,
    default_if_no_args: bool,
    mark: &'a str,
    unknown_options: UnknownOptionsPolicy,
    help_flags: &'a [String],
}

/// Run a config subcommand
pub fn run(cmd: ConfigCommands, group: &DefaultGroup) -> Result<()> {
    match cmd {
        ConfigCommands::Show(args) => run_show(args, group),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Keys => run_keys(),
    }
}

fn run_show(args: ShowArgs, group: &DefaultGroup) -> Result<()> {
    let config = group.config();
    let effective = EffectiveConfig {
        default: config.default_name(),
        default_if_no_args: config.invoke_default_when_no_args(),
        mark: config.mark(),
        unknown_options: config.unknown_options(),
        help_flags: config.help_flags(),
    };

    match args.format {
        OutputFormat::Yaml => {
            let yaml = serde_yml::to_string(&effective).into_diagnostic()?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&effective).into_diagnostic()?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn run_path() -> Result<()> {
    let path = Config::global_config_path(APP)
        .ok_or_else(|| miette::miette!("Could not determine global config directory"))?;

    println!("{}", path.display());
    if path.exists() {
        eprintln!("{}", style("(exists)").green());
    } else {
        eprintln!("{}", style("(not created)").dim());
    }

    Ok(())
}

fn run_keys() -> Result<()> {
    println!("{}", style("Available configuration keys:").bold());
    println!();

    for (key, description) in VALID_KEYS {
        println!("  {:<20} {}", style(key).cyan(), style(description).dim());
    }

    println!();
    println!(
        "{}",
        style("Environment overrides: DGROUP_CONFIG, DGROUP_DEFAULT, DGROUP_DEFAULT_IF_NO_ARGS, DGROUP_MARK").dim()
    );

    Ok(())
}
