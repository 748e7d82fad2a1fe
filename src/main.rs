// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Log filter from RUST_LOG, or from the verbosity flags when it is unset
fn env_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match (quiet, verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        };
        EnvFilter::new(level)
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose, cli.quiet))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build(args) => commands::cmd_build(&args),
        Commands::Inspect { archive } => commands::cmd_inspect(&archive),
        Commands::Compress { input, output } => commands::cmd_compress(&input, output.as_deref()),
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}
