// src/repository/mod.rs

//! Repository build pipeline
//!
//! A build runs in four stages:
//! - Scan the input directory for archives
//! - Extract control metadata and digests of each archive, optionally on
//!   the rayon pool
//! - In scan order: make sure the package's depictions exist, then append
//!   its record to the index
//! - Close the index and write its compressed copies
//!
//! Archive-level failures (unreadable container, missing control data,
//! unusable package identifier) follow the configured [`ErrorPolicy`].
//! Failures writing outputs always end the run.

mod scan;

pub use scan::{scan_archives, scan_package, PackageArchive, ScannedPackage};

use crate::compression::{self, CompressionFormat};
use crate::config::{ErrorPolicy, RepoConfig};
use crate::depiction::DepictionGenerator;
use crate::error::{Error, Result};
use crate::filesystem::path::sanitize_filename;
use crate::filesystem::WriteOutcome;
use crate::index::{IndexRecord, IndexWriter};
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{error, info, warn};

/// An archive left out of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArchive {
    pub path: PathBuf,
    pub reason: String,
}

/// Summary of a finished build
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Package identifiers in index order
    pub indexed: Vec<String>,
    pub skipped: Vec<SkippedArchive>,
    /// Packages that got at least one new depiction document
    pub depictions_created: usize,
    /// Packages whose depiction documents all existed already
    pub depictions_kept: usize,
    pub index_file: PathBuf,
    pub compressed_files: Vec<PathBuf>,
}

impl BuildReport {
    /// True when every scanned archive made it into the index
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Build the index, its compressed copies and missing depictions
///
/// The configuration is validated first, so a trailing `/` on the base
/// URL never doubles up in generated links.
pub fn build(config: &RepoConfig) -> Result<BuildReport> {
    let config = &config.clone().validate()?;
    let extra_formats = config.extra_formats()?;
    let archives = scan_archives(&config.deb_dir, &config.extension)?;
    info!(
        "Indexing {} archives from {}",
        archives.len(),
        config.deb_dir.display()
    );

    let scanned: Vec<Result<ScannedPackage>> = if config.parallel {
        archives.par_iter().map(scan_package).collect()
    } else {
        archives.iter().map(scan_package).collect()
    };

    let generator = DepictionGenerator::new(config)?;
    let mut writer = IndexWriter::create(&config.index_file)?;
    let mut report = BuildReport::default();

    for (archive, result) in archives.iter().zip(scanned) {
        let (package_id, package) = match result.and_then(identify) {
            Ok(identified) => identified,
            Err(e) => {
                reject(config.error_policy, archive, e, &mut report)?;
                continue;
            }
        };

        let depiction = generator.ensure(&package_id, &package.control)?;
        let created = depiction.json == WriteOutcome::Created
            || depiction.html == Some(WriteOutcome::Created);
        if created {
            report.depictions_created += 1;
        } else {
            report.depictions_kept += 1;
        }

        let record = IndexRecord::new(
            config,
            &package.archive.file_name,
            package.size,
            &package.control,
            package.checksums,
            depiction.urls,
        )?;
        writer.append(&record)?;
        report.indexed.push(package_id);
    }

    report.index_file = writer.finish()?;
    info!(
        "Wrote {} records to {}",
        report.indexed.len(),
        report.index_file.display()
    );

    report.compressed_files.push(compression::compress_file(
        &report.index_file,
        &config.compressed_file,
        CompressionFormat::Bzip2,
    )?);
    for format in extra_formats {
        let output = config.extra_output(format);
        report
            .compressed_files
            .push(compression::compress_file(&report.index_file, &output, format)?);
    }

    if !report.skipped.is_empty() {
        warn!("{} archives were skipped", report.skipped.len());
    }
    Ok(report)
}

/// Require a package identifier usable as a directory name
fn identify(package: ScannedPackage) -> Result<(String, ScannedPackage)> {
    let id = package
        .control
        .package()
        .ok_or(Error::MissingField("Package"))?;
    let id = sanitize_filename(id)?.to_string();
    Ok((id, package))
}

fn reject(
    policy: ErrorPolicy,
    archive: &PackageArchive,
    err: Error,
    report: &mut BuildReport,
) -> Result<()> {
    match policy {
        ErrorPolicy::Skip => {
            warn!("Skipping {}: {}", archive.path.display(), err);
            report.skipped.push(SkippedArchive {
                path: archive.path.clone(),
                reason: err.to_string(),
            });
            Ok(())
        }
        ErrorPolicy::Abort => {
            error!("Failed to index {}: {}", archive.path.display(), err);
            Err(err)
        }
    }
}
