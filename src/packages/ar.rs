// src/packages/ar.rs

//! Unix `ar` container parsing
//!
//! A `.deb` is an `ar` archive: an 8-byte global signature followed by
//! members, each a 60-byte ASCII header and a payload padded to an even
//! length.
//!
//! ```text
//! offset  len  field
//! 0       16   name (space padded, GNU style may end in '/')
//! 16      12   mtime
//! 28      6    owner id
//! 34      6    group id
//! 40      8    mode (octal)
//! 48      10   size (decimal)
//! 58      2    terminator "`\n"
//! ```

use crate::error::{Error, Result};
use std::io::Read;

/// Global signature at offset 0
pub const AR_MAGIC: &[u8; 8] = b"!<arch>\n";
/// Member header size
pub const HEADER_SIZE: usize = 60;

/// A member parsed from an `ar` container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMember {
    /// Normalized name: trailing padding and a GNU '/' terminator removed
    pub name: String,
    /// Payload length from the header
    pub size: u64,
    pub payload: Vec<u8>,
}

/// Check whether `data` starts with the `ar` signature
pub fn has_ar_magic(data: &[u8]) -> bool {
    data.starts_with(AR_MAGIC)
}

/// Normalize a raw header identifier
fn normalize_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    let name = name.trim_end();
    name.strip_suffix('/').unwrap_or(name).to_string()
}

/// Parse every member of an in-memory `ar` container, in file order
///
/// A container holding only the signature yields an empty list. A bad
/// header field or a payload shorter than its header claims is a
/// `Format` error.
pub fn parse_members(data: &[u8]) -> Result<Vec<ArchiveMember>> {
    if !has_ar_magic(data) {
        return Err(Error::Format("missing ar signature".to_string()));
    }

    let mut archive = ::ar::Archive::new(data);
    let mut members = Vec::new();

    while let Some(entry) = archive.next_entry() {
        let mut entry = entry.map_err(|e| {
            Error::Format(format!(
                "invalid member header after {} members: {}",
                members.len(),
                e
            ))
        })?;

        let name = normalize_name(entry.header().identifier());
        let size = entry.header().size();

        let mut payload = Vec::new();
        entry
            .read_to_end(&mut payload)
            .map_err(|e| Error::Format(format!("failed to read member '{}': {}", name, e)))?;

        if payload.len() as u64 != size {
            return Err(Error::Format(format!(
                "member '{}' claims {} bytes but only {} remain",
                name,
                size,
                payload.len()
            )));
        }

        members.push(ArchiveMember {
            name,
            size,
            payload,
        });
    }

    Ok(members)
}

/// Find a member by normalized name
///
/// When a name occurs more than once the last occurrence wins.
pub fn find_member<'a>(members: &'a [ArchiveMember], name: &str) -> Option<&'a ArchiveMember> {
    members.iter().rev().find(|m| m.name == name)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Assemble an `ar` container by hand
    pub(crate) fn build_ar(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut out = AR_MAGIC.to_vec();
        for (name, payload) in members {
            let header = format!(
                "{:<16}{:<12}{:<6}{:<6}{:<8}{:<10}`\n",
                name,
                0,
                0,
                0,
                "100644",
                payload.len()
            );
            assert_eq!(header.len(), HEADER_SIZE);
            out.extend_from_slice(header.as_bytes());
            out.extend_from_slice(payload);
            if payload.len() % 2 != 0 {
                out.push(b'\n');
            }
        }
        out
    }

    #[test]
    fn test_parse_even_members() {
        let data = build_ar(&[("debian-binary", b"2.0\n"), ("control.tar.gz", b"abcdef")]);
        let members = parse_members(&data).unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "debian-binary");
        assert_eq!(members[0].payload, b"2.0\n");
        assert_eq!(members[1].name, "control.tar.gz");
        assert_eq!(members[1].size, 6);
    }

    #[test]
    fn test_odd_member_padding_is_skipped() {
        let data = build_ar(&[
            ("odd", b"abc"),
            ("control.tar.gz", b"xyz1"),
            ("data.tar.gz", b"q"),
        ]);
        let members = parse_members(&data).unwrap();

        let names: Vec<_> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["odd", "control.tar.gz", "data.tar.gz"]);
        assert_eq!(members[0].payload, b"abc");
        assert_eq!(members[1].payload, b"xyz1");
        assert_eq!(members[2].payload, b"q");
    }

    #[test]
    fn test_gnu_slash_terminator_stripped() {
        let data = build_ar(&[("control.tar.xz/", b"zz")]);
        let members = parse_members(&data).unwrap();
        assert_eq!(members[0].name, "control.tar.xz");
        assert!(find_member(&members, "control.tar.xz").is_some());
    }

    #[test]
    fn test_short_name_is_legal() {
        let data = build_ar(&[("a", b"12")]);
        assert_eq!(parse_members(&data).unwrap()[0].name, "a");
    }

    #[test]
    fn test_signature_only_yields_no_members() {
        assert!(parse_members(AR_MAGIC).unwrap().is_empty());
    }

    #[test]
    fn test_missing_signature() {
        let err = parse_members(b"PK\x03\x04 not an ar file").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_non_numeric_size_is_fatal() {
        let mut data = build_ar(&[("control.tar.gz", b"abcd")]);
        data[8 + 48..8 + 58].copy_from_slice(b"12x4      ");
        let err = parse_members(&data).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(err.to_string().contains("invalid member header"));
    }

    #[test]
    fn test_truncated_header() {
        let mut data = AR_MAGIC.to_vec();
        data.extend_from_slice(b"control.tar.gz  0     ");
        assert!(matches!(parse_members(&data), Err(Error::Format(_))));
    }

    #[test]
    fn test_payload_past_end() {
        let mut data = build_ar(&[("control.tar.gz", b"abcd")]);
        data.truncate(data.len() - 2);
        let err = parse_members(&data).unwrap_err();
        assert!(err.to_string().contains("claims 4 bytes"));
    }

    #[test]
    fn test_duplicate_member_last_wins() {
        let data = build_ar(&[
            ("control.tar.gz", b"first"),
            ("data.tar.gz", b"dd"),
            ("control.tar.gz", b"second"),
        ]);
        let members = parse_members(&data).unwrap();
        assert_eq!(members.len(), 3);

        let member = find_member(&members, "control.tar.gz").unwrap();
        assert_eq!(member.payload, b"second");
    }

    #[test]
    fn test_has_ar_magic() {
        assert!(has_ar_magic(b"!<arch>\ncontrol.tar.gz"));
        assert!(!has_ar_magic(b"!<arch>"));
    }
}
