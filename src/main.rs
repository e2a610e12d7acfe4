use clap::{CommandFactory, FromArgMatches};
use console::style;
use default_group::cli::{commands, Cli, Commands, DefaultGroup, APP, DEFAULT_COMMAND};
use default_group::core::Config;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    // Logs go to stderr; stdout belongs to the commands
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_env("DGROUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = Config::load(APP)?;
    let group = DefaultGroup::new(Cli::command(), config.group_config(Some(DEFAULT_COMMAND))?);

    let matches = group.get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    if cli.group_only {
        println!("--group-only passed.");
    }
    if cli.global.verbose && !cli.global.quiet {
        if let Some(name) = matches.subcommand_name() {
            eprintln!("{} {}", style("→").dim(), style(name).cyan());
        }
    }

    match cli.command {
        Commands::Foo(args) => commands::foo::run(args),
        Commands::Bar => commands::bar::run(),
        Commands::Config(cmd) => commands::config::run(cmd, &group),
        Commands::Completions(args) => commands::completions::run(args, &group),
    }
}
