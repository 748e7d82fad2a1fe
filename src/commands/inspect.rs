// src/commands/inspect.rs
//! Single-archive inspection

use anyhow::{Context, Result};
use debrepo::hash::HashAlgorithm;
use debrepo::repository::{scan_package, PackageArchive};
use std::path::Path;
use tracing::info;

/// Print what the index would record for one archive
pub fn cmd_inspect(path: &Path) -> Result<()> {
    info!("Inspecting {}", path.display());

    let archive = PackageArchive {
        path: path.to_path_buf(),
        file_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };
    let package = scan_package(&archive)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("{}", archive.file_name);
    for (key, value) in package.control.iter() {
        println!("  {}: {}", key, value);
    }
    println!("  Size: {}", package.size);
    for algorithm in HashAlgorithm::ALL {
        println!(
            "  {}: {}",
            algorithm.index_field(),
            package.checksums.get(algorithm)
        );
    }

    Ok(())
}
