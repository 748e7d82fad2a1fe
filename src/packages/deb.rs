// src/packages/deb.rs

//! Debian package control extraction
//!
//! Reads a `.deb` container, picks its `control.tar.*` member and parses
//! the `control` file inside it.

use crate::compression::{self, CompressionFormat};
use crate::error::{Error, Result};
use crate::packages::ar::{self, ArchiveMember};
use crate::packages::control::ControlMetadata;
use std::fs;
use std::io::Read;
use std::path::Path;
use tar::Archive;
use tracing::debug;

/// Control member names, in the order they are looked up
pub const CONTROL_MEMBER_CANDIDATES: &[&str] = &[
    "control.tar.gz",
    "control.tar.xz",
    "control.tar.bz2",
    "control.tar.zst",
    "control.tar",
];

/// Base name of the metadata entry inside the control tarball
const CONTROL_FILE_NAME: &str = "control";

/// Extract the control metadata of a `.deb` file
pub fn extract_control(path: &Path) -> Result<ControlMetadata> {
    let data = fs::read(path).map_err(|e| Error::io(path, e))?;
    extract_control_from_bytes(&data).map_err(|e| match e {
        Error::Decode { source, .. } => Error::Decode {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Extract the control metadata from an in-memory `.deb`
///
/// Only the first candidate member present is tried; a decode failure on
/// it is fatal rather than a reason to look at the next candidate.
pub fn extract_control_from_bytes(data: &[u8]) -> Result<ControlMetadata> {
    let members = ar::parse_members(data)?;
    let member = select_control_member(&members)
        .ok_or_else(|| Error::Format("no control member found".to_string()))?;

    debug!("Using control member {} ({} bytes)", member.name, member.size);

    let content = read_control_file(member)?;
    Ok(ControlMetadata::parse(&content))
}

/// Pick the highest-priority control member present
pub fn select_control_member(members: &[ArchiveMember]) -> Option<&ArchiveMember> {
    CONTROL_MEMBER_CANDIDATES
        .iter()
        .find_map(|candidate| ar::find_member(members, candidate))
}

/// Unpack a control tarball member and return its `control` file as text
fn read_control_file(member: &ArchiveMember) -> Result<String> {
    let format = CompressionFormat::detect(&member.name, &member.payload);
    let decoder = compression::create_decoder(member.payload.as_slice(), format)?;
    let mut archive = Archive::new(decoder);

    let entries = archive
        .entries()
        .map_err(|e| Error::Format(format!("failed to read {}: {}", member.name, e)))?;

    for entry in entries {
        let mut entry = entry
            .map_err(|e| Error::Format(format!("corrupt entry in {}: {}", member.name, e)))?;

        let is_control = entry
            .path()
            .map_err(|e| Error::Format(format!("bad entry path in {}: {}", member.name, e)))?
            .file_name()
            .is_some_and(|name| name == CONTROL_FILE_NAME);

        if !is_control {
            continue;
        }

        let mut raw = Vec::new();
        entry
            .read_to_end(&mut raw)
            .map_err(|e| Error::Format(format!("failed to read control from {}: {}", member.name, e)))?;

        let text = std::str::from_utf8(&raw).map_err(|source| Error::Decode {
            path: member.name.clone().into(),
            source,
        })?;
        return Ok(text.to_string());
    }

    Err(Error::Format(format!(
        "{} holds no '{}' entry",
        member.name, CONTROL_FILE_NAME
    )))
}
