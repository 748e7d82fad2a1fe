// src/lib.rs

//! debrepo
//!
//! Builds a static APT-style package repository for jailbroken iOS package
//! managers from a directory of `.deb` archives.
//!
//! # Outputs
//!
//! - `Packages`: one metadata record per archive, with size and digests
//! - `Packages.bz2` plus optional gzip/xz/zstd copies
//! - Per-package Sileo JSON and HTML depiction pages, generated once and
//!   never overwritten
//!
//! # Pipeline
//!
//! - [`packages`]: `ar` container parsing and control metadata extraction
//! - [`hash`]: single-pass MD5/SHA1/SHA256/SHA512 digests
//! - [`depiction`]: Sileo view documents and HTML pages
//! - [`index`]: record rendering and the index writer
//! - [`repository`]: the batch driver tying the stages together

pub mod compression;
pub mod config;
pub mod depiction;
mod error;
pub mod filesystem;
pub mod hash;
pub mod index;
pub mod packages;
pub mod repository;

pub use config::{ErrorPolicy, RepoConfig};
pub use error::{Error, Result};
pub use hash::{Checksums, HashAlgorithm, Hasher};
pub use repository::{build, BuildReport};
