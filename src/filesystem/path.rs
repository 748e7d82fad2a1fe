// src/filesystem/path.rs

//! Path checks for names taken from package metadata
//!
//! Package identifiers come from the `control` file of an untrusted archive
//! and become directory names under the depiction root, so they must be a
//! single, plain path component.

use crate::error::{Error, Result};

/// Validate an untrusted name for use as a single path component
///
/// # Examples
///
/// ```
/// use debrepo::filesystem::path::sanitize_filename;
///
/// assert_eq!(sanitize_filename("com.example.demo").unwrap(), "com.example.demo");
///
/// assert!(sanitize_filename("../demo").is_err());
/// assert!(sanitize_filename("sub/demo").is_err());
/// ```
pub fn sanitize_filename(name: &str) -> Result<&str> {
    if name.contains('/') || name.contains('\\') {
        return Err(Error::Format(format!(
            "name contains a path separator: {}",
            name
        )));
    }

    if name == ".." || name == "." {
        return Err(Error::Format(format!("invalid name: {}", name)));
    }

    if name.trim().is_empty() {
        return Err(Error::Format("empty name".to_string()));
    }

    if name.chars().any(char::is_control) {
        return Err(Error::Format(format!(
            "name contains control characters: {:?}",
            name
        )));
    }

    Ok(name)
}
