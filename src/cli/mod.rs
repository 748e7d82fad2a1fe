// src/cli/mod.rs
//! CLI definitions for debrepo
//!
//! This module contains the command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! - `build` - Index a directory of archives and generate depictions
//! - `inspect` - Show the control fields and digests of one archive
//! - `compress` - Write a bzip2 copy of a file
//! - `completions` - Generate shell completion scripts

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "debrepo")]
#[command(author = "debrepo Contributors")]
#[command(version)]
#[command(about = "Build an APT/Sileo repository index from a directory of .deb files", long_about = None)]
pub struct Cli {
    /// More log output (repeat for trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the Packages index, its compressed copies and depictions
    Build(BuildArgs),

    /// Print the control fields, size and digests of an archive
    Inspect {
        /// Path to the .deb file
        archive: PathBuf,
    },

    /// Compress a file with bzip2
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output path (default: input with .bz2 appended)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Overrides applied on top of the configuration file
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// TOML configuration file
    #[arg(short, long, env = "DEBREPO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory scanned for archives
    #[arg(long, env = "DEBREPO_DEB_DIR")]
    pub deb_dir: Option<PathBuf>,

    /// Index output path
    #[arg(long, env = "DEBREPO_INDEX_FILE")]
    pub index_file: Option<PathBuf>,

    /// Bzip2 index output path
    #[arg(long, env = "DEBREPO_COMPRESSED_FILE")]
    pub compressed_file: Option<PathBuf>,

    /// Extra compressed index copies (gzip, xz, zstd)
    #[arg(long, value_delimiter = ',', env = "DEBREPO_EXTRA_COMPRESSION")]
    pub extra_compression: Vec<String>,

    /// Depiction output directory
    #[arg(long, env = "DEBREPO_DEPICTION_DIR")]
    pub depiction_dir: Option<PathBuf>,

    /// URL path of the depiction directory (default: --depiction-dir as given)
    #[arg(long, env = "DEBREPO_DEPICTION_URL_PATH")]
    pub depiction_url_path: Option<String>,

    /// Absolute URL the repository is served from
    #[arg(long, env = "DEBREPO_BASE_URL")]
    pub base_url: Option<String>,

    /// Icon URL written into every record
    #[arg(long, env = "DEBREPO_ICON_URL")]
    pub icon_url: Option<String>,

    /// Prefix of the Filename field
    #[arg(long, env = "DEBREPO_POOL_PREFIX")]
    pub pool_prefix: Option<String>,

    /// Fail on the first archive that cannot be indexed
    #[arg(long)]
    pub abort_on_error: bool,

    /// Extract and hash archives in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Skip the HTML depiction page
    #[arg(long)]
    pub no_html: bool,

    /// Exit non-zero when any archive was skipped
    #[arg(long)]
    pub strict_exit: bool,
}
