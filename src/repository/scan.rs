// src/repository/scan.rs

//! Input directory scan and per-archive extraction

use crate::error::{Error, Result};
use crate::hash::{self, Checksums};
use crate::packages::control::ControlMetadata;
use crate::packages::deb;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A package archive found in the input directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArchive {
    pub path: PathBuf,
    /// File name as written after the pool prefix in `Filename:`
    pub file_name: String,
}

/// Everything read from one archive
#[derive(Debug, Clone)]
pub struct ScannedPackage {
    pub archive: PackageArchive,
    pub size: u64,
    pub control: ControlMetadata,
    pub checksums: Checksums,
}

/// List archives directly inside `dir` whose extension is `extension`
///
/// Entries come back in directory iteration order; nothing is sorted.
pub fn scan_archives(dir: &Path, extension: &str) -> Result<Vec<PackageArchive>> {
    let mut archives = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| Error::io(dir, e.into()))?;

        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().is_none_or(|ext| ext != extension) {
            continue;
        }

        archives.push(PackageArchive {
            path: entry.path().to_path_buf(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
        });
    }

    debug!("Found {} archives in {}", archives.len(), dir.display());
    Ok(archives)
}

/// Extract control metadata, size and digests of one archive
pub fn scan_package(archive: &PackageArchive) -> Result<ScannedPackage> {
    let control = deb::extract_control(&archive.path)?;
    let (checksums, size) = hash::hash_file(&archive.path)?;

    debug!(
        "Scanned {} ({} bytes, package {:?})",
        archive.file_name,
        size,
        control.package()
    );

    Ok(ScannedPackage {
        archive: archive.clone(),
        size,
        control,
        checksums,
    })
}
