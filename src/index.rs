// src/index.rs

//! `Packages` index records
//!
//! One record block per archive, fields in this fixed order:
//!
//! ```text
//! Package, Architecture, Version, Section, Maintainer, Installed-Size,
//! [Depends], Filename, Size, MD5sum, SHA1, SHA256, SHA512, Description,
//! Depiction, SileoDepiction, Name, Author, Sponsor, Icon
//! ```
//!
//! followed by a blank line. `Depends` only appears when the control file
//! has it; every other absent field takes its configured default.

use crate::config::RepoConfig;
use crate::depiction::DepictionUrls;
use crate::error::{Error, Result};
use crate::hash::Checksums;
use crate::packages::control::ControlMetadata;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A fully resolved record of the index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRecord {
    pub package: String,
    pub architecture: String,
    pub version: String,
    pub section: String,
    pub maintainer: String,
    pub installed_size: String,
    pub depends: Option<String>,
    pub filename: String,
    pub size: u64,
    pub checksums: Checksums,
    pub description: String,
    pub depiction: String,
    pub sileo_depiction: String,
    pub name: String,
    pub author: String,
    pub sponsor: String,
    pub icon: String,
}

impl IndexRecord {
    /// Build a record from extracted metadata, substituting defaults
    ///
    /// Fails with `MissingField` when the control data has no `Package`.
    pub fn new(
        config: &RepoConfig,
        file_name: &str,
        size: u64,
        control: &ControlMetadata,
        checksums: Checksums,
        urls: DepictionUrls,
    ) -> Result<Self> {
        let package = control.package().ok_or(Error::MissingField("Package"))?;
        let defaults = &config.defaults;
        let field = |key: &str, default: &str| control.get_or(key, default).to_string();

        Ok(Self {
            package: package.to_string(),
            architecture: field("Architecture", &defaults.architecture),
            version: field("Version", &defaults.version),
            section: field("Section", &defaults.section),
            maintainer: field("Maintainer", &defaults.maintainer),
            installed_size: field("Installed-Size", &defaults.installed_size),
            depends: control.get("Depends").map(str::to_string),
            filename: pool_filename(&config.pool_prefix(), file_name),
            size,
            checksums,
            description: field("Description", &defaults.description),
            depiction: urls.depiction,
            sileo_depiction: urls.sileo,
            name: field("Name", &defaults.name),
            author: field("Author", &defaults.author),
            sponsor: field("Sponsor", &defaults.sponsor),
            icon: config.icon_url.clone(),
        })
    }

    /// Render the record block, including its trailing blank line
    pub fn render(&self) -> String {
        let mut out = String::new();
        let mut line = |key: &str, value: &str| {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{}: {}", key, value);
        };

        line("Package", &self.package);
        line("Architecture", &self.architecture);
        line("Version", &self.version);
        line("Section", &self.section);
        line("Maintainer", &self.maintainer);
        line("Installed-Size", &self.installed_size);
        if let Some(depends) = &self.depends {
            line("Depends", depends);
        }
        line("Filename", &self.filename);
        line("Size", &self.size.to_string());
        for (algorithm, digest) in self.checksums.iter() {
            line(algorithm.index_field(), digest);
        }
        line("Description", &self.description);
        line("Depiction", &self.depiction);
        line("SileoDepiction", &self.sileo_depiction);
        line("Name", &self.name);
        line("Author", &self.author);
        line("Sponsor", &self.sponsor);
        line("Icon", &self.icon);

        out.push('\n');
        out
    }
}

/// `Filename:` value for an archive in the pool directory
pub fn pool_filename(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

/// Sequential writer for the index file
///
/// The file is created (or truncated) once and each record block is
/// appended whole.
pub struct IndexWriter {
    path: PathBuf,
    out: BufWriter<File>,
    records: usize,
}

impl IndexWriter {
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            out: BufWriter::new(file),
            records: 0,
        })
    }

    pub fn append(&mut self, record: &IndexRecord) -> Result<()> {
        self.out
            .write_all(record.render().as_bytes())
            .map_err(|e| Error::io(&self.path, e))?;
        self.records += 1;
        Ok(())
    }

    /// Number of records written so far
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and close the file, returning its path
    pub fn finish(self) -> Result<PathBuf> {
        let file = self
            .out
            .into_inner()
            .map_err(|e| Error::io(&self.path, e.into_error()))?;
        file.sync_all().map_err(|e| Error::io(&self.path, e))?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_bytes;

    fn urls(id: &str) -> DepictionUrls {
        DepictionUrls {
            depiction: format!("https://repo.example.com/descriptions/{}/", id),
            sileo: format!("https://repo.example.com/descriptions/{}/depiction.json", id),
        }
    }

    fn field_names(block: &str) -> Vec<&str> {
        block
            .lines()
            .filter_map(|line| line.split_once(": ").map(|(k, _)| k))
            .collect()
    }

    #[test]
    fn test_defaults_substituted() {
        let config = RepoConfig::default();
        let control = ControlMetadata::parse("Package: demo\nVersion: 2.0\n");
        let record =
            IndexRecord::new(&config, "demo.deb", 10, &control, hash_bytes(b"x"), urls("demo"))
                .unwrap();

        let block = record.render();
        assert!(block.contains("Architecture: iphoneos-arm64\n"));
        assert!(block.contains("Version: 2.0\n"));
        assert!(block.contains("Section: Tweaks\n"));
        assert!(block.contains("Maintainer: Unknown\n"));
        assert!(block.contains("Installed-Size: 1024\n"));
        assert!(block.contains("Description: No description\n"));
        assert!(block.contains("Name: \n"));
        assert!(block.contains("Filename: ./debs/demo.deb\n"));
        assert!(block.contains("Icon: file:///var/jb/Library/IconRepo/icon.png\n"));
        assert!(!block.contains("Depends:"));
        assert!(block.ends_with("\n\n"));
    }

    #[test]
    fn test_field_order_with_depends() {
        let config = RepoConfig::default();
        let control =
            ControlMetadata::parse("Depends: firmware (>= 14.0)\nPackage: demo\nAuthor: Jane\n");
        let record =
            IndexRecord::new(&config, "demo.deb", 1, &control, hash_bytes(b"x"), urls("demo"))
                .unwrap();

        assert_eq!(
            field_names(&record.render()),
            [
                "Package",
                "Architecture",
                "Version",
                "Section",
                "Maintainer",
                "Installed-Size",
                "Depends",
                "Filename",
                "Size",
                "MD5sum",
                "SHA1",
                "SHA256",
                "SHA512",
                "Description",
                "Depiction",
                "SileoDepiction",
                "Name",
                "Author",
                "Sponsor",
                "Icon",
            ]
        );
    }

    #[test]
    fn test_missing_package_rejected() {
        let config = RepoConfig::default();
        let control = ControlMetadata::parse("Version: 2.0\n");
        let result =
            IndexRecord::new(&config, "x.deb", 1, &control, hash_bytes(b"x"), urls("x"));
        assert!(matches!(result, Err(Error::MissingField("Package"))));
    }

    #[test]
    fn test_pool_filename() {
        assert_eq!(pool_filename("./debs", "a.deb"), "./debs/a.deb");
        assert_eq!(pool_filename("./debs/", "a.deb"), "./debs/a.deb");
        assert_eq!(pool_filename("", "a.deb"), "a.deb");
    }

    #[test]
    fn test_writer_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Packages");
        std::fs::write(&path, "stale content from a previous run\n").unwrap();
        let config = RepoConfig::default();

        let mut writer = IndexWriter::create(&path).unwrap();
        for id in ["first", "second"] {
            let control = ControlMetadata::parse(&format!("Package: {}\n", id));
            let record = IndexRecord::new(
                &config,
                &format!("{}.deb", id),
                1,
                &control,
                hash_bytes(id.as_bytes()),
                urls(id),
            )
            .unwrap();
            writer.append(&record).unwrap();
        }
        assert_eq!(writer.records(), 2);
        writer.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("stale"));
        let packages: Vec<_> = content
            .lines()
            .filter_map(|l| l.strip_prefix("Package: "))
            .collect();
        assert_eq!(packages, ["first", "second"]);
    }
}
