// src/packages/mod.rs

//! Debian package archive support
//!
//! A `.deb` is an `ar` container; its control member is a (possibly
//! compressed) tarball holding the `control` metadata file.

pub mod ar;
pub mod control;
pub mod deb;

pub use control::ControlMetadata;
pub use deb::extract_control;
