// src/commands/compress.rs
//! Standalone compression command

use anyhow::{Context, Result};
use debrepo::compression::{self, CompressionFormat};
use std::path::{Path, PathBuf};

/// Write a bzip2 copy of `input`
pub fn cmd_compress(input: &Path, output: Option<&Path>) -> Result<()> {
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let mut name = input.as_os_str().to_owned();
            name.push(CompressionFormat::Bzip2.extension());
            PathBuf::from(name)
        }
    };

    let written = compression::compress_file(input, &output, CompressionFormat::Bzip2)
        .with_context(|| format!("Failed to compress {}", input.display()))?;
    println!("Wrote {}", written.display());
    Ok(())
}
