// src/commands/build.rs
//! Repository build command

use crate::cli::BuildArgs;
use anyhow::{Context, Result};
use debrepo::config::{ErrorPolicy, RepoConfig};
use debrepo::repository;
use tracing::info;

/// Build the index, its compressed copies and any missing depictions
pub fn cmd_build(args: &BuildArgs) -> Result<()> {
    let config = resolve_config(args)?;
    info!(
        "Building repository from {} for {}",
        config.deb_dir.display(),
        config.base_url
    );

    let report = repository::build(&config).context("Repository build failed")?;

    println!(
        "Indexed {} packages into {}",
        report.indexed.len(),
        report.index_file.display()
    );
    for path in &report.compressed_files {
        println!("  Compressed: {}", path.display());
    }
    println!(
        "  Depictions: {} created, {} kept",
        report.depictions_created, report.depictions_kept
    );

    if !report.skipped.is_empty() {
        println!("Skipped {} archives:", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {}: {}", skipped.path.display(), skipped.reason);
        }
        if args.strict_exit {
            anyhow::bail!("{} archives could not be indexed", report.skipped.len());
        }
    }

    Ok(())
}

/// Configuration file (or defaults) with command-line overrides applied
pub fn resolve_config(args: &BuildArgs) -> Result<RepoConfig> {
    let mut config = match &args.config {
        Some(path) => RepoConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => RepoConfig::default(),
    };

    if let Some(dir) = &args.deb_dir {
        config.deb_dir = dir.clone();
    }
    if let Some(path) = &args.index_file {
        config.index_file = path.clone();
    }
    if let Some(path) = &args.compressed_file {
        config.compressed_file = path.clone();
    }
    if !args.extra_compression.is_empty() {
        config.extra_compression = args.extra_compression.clone();
    }
    if let Some(dir) = &args.depiction_dir {
        config.depiction_dir = dir.clone();
    }
    if let Some(path) = &args.depiction_url_path {
        config.depiction_url_path = Some(path.clone());
    }
    if let Some(url) = &args.base_url {
        config.base_url = url.clone();
    }
    if let Some(url) = &args.icon_url {
        config.icon_url = url.clone();
    }
    if let Some(prefix) = &args.pool_prefix {
        config.pool_prefix = Some(prefix.clone());
    }
    if args.abort_on_error {
        config.error_policy = ErrorPolicy::Abort;
    }
    if args.parallel {
        config.parallel = true;
    }
    if args.no_html {
        config.html = false;
    }

    Ok(config.validate()?)
}
