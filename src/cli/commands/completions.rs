//! Shell completions generation command.
//!
//! # Usage
//!
//! ```bash
//! idesk completions bash > ~/.local/share/bash-completion/completions/idesk
//! idesk completions fish > ~/.config/fish/completions/idesk.fish
//! ```

use crate::cli::{Cli, CompletionsArgs, ShellType};
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;
use tracing::info;

/// Execute the completions command.
///
/// # Errors
///
/// Never fails today; returns `Result` to match the other commands.
pub fn execute(args: &CompletionsArgs) -> Result<()> {
    info!(shell = ?args.shell, "Generating shell completions");

    let mut cmd = Cli::command();
    generate(
        convert_shell_type(args.shell),
        &mut cmd,
        "idesk",
        &mut io::stdout(),
    );
    Ok(())
}

/// Convert our `ShellType` enum to `clap_complete`'s Shell enum.
const fn convert_shell_type(shell: ShellType) -> Shell {
    match shell {
        ShellType::Bash => Shell::Bash,
        ShellType::Zsh => Shell::Zsh,
        ShellType::Fish => Shell::Fish,
        ShellType::PowerShell => Shell::PowerShell,
        ShellType::Elvish => Shell::Elvish,
    }
}
