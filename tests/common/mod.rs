// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use debrepo::RepoConfig;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Compression applied to a fixture's control tarball
#[derive(Debug, Clone, Copy)]
pub enum ControlCodec {
    Gzip,
    Xz,
    Bzip2,
}

impl ControlCodec {
    pub fn member_name(self) -> &'static str {
        match self {
            Self::Gzip => "control.tar.gz",
            Self::Xz => "control.tar.xz",
            Self::Bzip2 => "control.tar.bz2",
        }
    }

    pub fn encode(self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(data).unwrap();
                encoder.finish().unwrap()
            }
            Self::Xz => {
                let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
                encoder.write_all(data).unwrap();
                encoder.finish().unwrap()
            }
            Self::Bzip2 => {
                let mut encoder =
                    bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
                encoder.write_all(data).unwrap();
                encoder.finish().unwrap()
            }
        }
    }
}

/// Tarball holding `./control` with the given text
pub fn control_tar(control: &str) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    let mut header = tar::Header::new_gnu();
    header.set_size(control.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    builder
        .append_data(&mut header, "./control", control.as_bytes())
        .unwrap();
    builder.into_inner().unwrap()
}

/// `ar` container with the given members, in order
pub fn ar_archive(members: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut builder = ar::Builder::new(&mut out);
    for (name, data) in members {
        let header = ar::Header::new(name.as_bytes().to_vec(), data.len() as u64);
        builder.append(&header, *data).unwrap();
    }
    drop(builder);
    out
}

/// A complete `.deb` whose control text is `control`
pub fn deb_bytes(control: &str, codec: ControlCodec) -> Vec<u8> {
    let control_member = codec.encode(&control_tar(control));
    let data_member = ControlCodec::Gzip.encode(&tar::Builder::new(Vec::new()).into_inner().unwrap());
    ar_archive(&[
        ("debian-binary", b"2.0\n"),
        (codec.member_name(), &control_member),
        ("data.tar.gz", &data_member),
    ])
}

/// Scratch repository laid out like a real one under a temp directory
pub struct TestRepo {
    pub dir: TempDir,
    pub config: RepoConfig,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        let config = RepoConfig {
            deb_dir: root.join("debs"),
            index_file: root.join("Packages"),
            compressed_file: root.join("Packages.bz2"),
            depiction_dir: root.join("descriptions"),
            depiction_url_path: Some("descriptions".to_string()),
            base_url: "https://repo.example.com".to_string(),
            ..Default::default()
        };
        fs::create_dir_all(&config.deb_dir).unwrap();
        Self { dir, config }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write raw bytes as an archive in the input directory
    pub fn add_raw(&self, file_name: &str, data: &[u8]) -> PathBuf {
        let path = self.config.deb_dir.join(file_name);
        fs::write(&path, data).unwrap();
        path
    }

    /// Write a gzip-control `.deb` in the input directory
    pub fn add_deb(&self, file_name: &str, control: &str) -> PathBuf {
        self.add_raw(file_name, &deb_bytes(control, ControlCodec::Gzip))
    }

    pub fn index(&self) -> String {
        fs::read_to_string(&self.config.index_file).unwrap()
    }

    /// `Package:` values of the index, in order
    pub fn indexed_packages(&self) -> Vec<String> {
        self.index()
            .lines()
            .filter_map(|line| line.strip_prefix("Package: "))
            .map(str::to_string)
            .collect()
    }

    pub fn depiction_path(&self, package_id: &str, file: &str) -> PathBuf {
        self.config.depiction_dir.join(package_id).join(file)
    }
}

/// Value of `key` in a single record block
pub fn field<'a>(block: &'a str, key: &str) -> Option<&'a str> {
    block
        .lines()
        .find_map(|line| line.split_once(": ").filter(|(k, _)| *k == key).map(|(_, v)| v))
}
