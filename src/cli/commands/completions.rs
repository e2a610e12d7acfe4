//! Shell completion generation
//!
//! Generates shell completion scripts for bash, zsh, fish, and PowerShell.
//!
//! # Usage
//!
//! ```bash
//! # Bash - add to ~/.bashrc
//! source <(dgroup completions bash)
//!
//! # Zsh - add to ~/.zshrc
//! source <(dgroup completions zsh)
//!
//! # Fish - add to ~/.config/fish/completions/dgroup.fish
//! dgroup completions fish > ~/.config/fish/completions/dgroup.fish
//!
//! # PowerShell - add to $PROFILE
//! dgroup completions powershell >> $PROFILE
//! ```

use clap_complete::{generate, Shell};
use miette::Result;
use std::io;

use crate::cli::DefaultGroup;

#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: CompletionsArgs, group: &DefaultGroup) -> Result<()> {
    let mut cmd = group.command().clone();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
