// src/filesystem/mod.rs

//! Filesystem helpers for generated repository artifacts
//!
//! Depiction documents follow a generate-once policy: a file that already
//! exists is never rewritten, even if its package changed. Delete the file
//! to have it regenerated on the next run.

pub mod path;

use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// What `write_if_missing` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written
    Created,
    /// The file already existed and was left untouched
    Kept,
}

/// Write a file only if nothing exists at `path`
///
/// `render` is only called when the file is absent. The file is opened with
/// `create_new`, so a file appearing between the check and the write is kept
/// rather than overwritten. Parent directories are created as needed.
pub fn write_if_missing<F>(path: &Path, render: F) -> Result<WriteOutcome>
where
    F: FnOnce() -> Result<Vec<u8>>,
{
    if path.exists() {
        debug!("Keeping existing {}", path.display());
        return Ok(WriteOutcome::Kept);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let contents = render()?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(WriteOutcome::Kept),
        Err(e) => return Err(Error::io(path, e)),
    };
    file.write_all(&contents).map_err(|e| Error::io(path, e))?;

    debug!("Wrote {}", path.display());
    Ok(WriteOutcome::Created)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_missing_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("descriptions/demo/depiction.json");

        let outcome = write_if_missing(&path, || Ok(b"{}".to_vec())).unwrap();

        assert_eq!(outcome, WriteOutcome::Created);
        assert_eq!(fs::read(&path).unwrap(), b"{}");
    }

    #[test]
    fn test_existing_file_is_kept_and_not_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depiction.json");
        fs::write(&path, "hand edited").unwrap();

        let outcome = write_if_missing(&path, || panic!("render must not run")).unwrap();

        assert_eq!(outcome, WriteOutcome::Kept);
        assert_eq!(fs::read_to_string(&path).unwrap(), "hand edited");
    }

    #[test]
    fn test_render_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");

        let result = write_if_missing(&path, || Err(Error::Template("boom".into())));

        assert!(result.is_err());
        assert!(!path.exists());
    }
}
