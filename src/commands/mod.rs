// src/commands/mod.rs
//! Command handlers for the debrepo CLI

mod build;
mod compress;
mod inspect;

pub use build::cmd_build;
pub use compress::cmd_compress;
pub use inspect::cmd_inspect;

use crate::cli::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

/// Write completions for `shell` to stdout
pub fn cmd_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
