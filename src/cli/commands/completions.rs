//! Shell completions command implementation.

use crate::cli::Cli;
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

/// Generate completions for the given shell on stdout.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "lks", &mut io::stdout());
    Ok(())
}
