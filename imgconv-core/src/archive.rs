//! Tar packaging of converted files

use crate::error::ArchiveError;

/// Permission bits written for every entry
pub const ENTRY_MODE: u32 = 0o666;

/// Filename used for archive payloads
pub const ARCHIVE_FILENAME: &str = "images.tar";

/// A named file to place in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    name: String,
    bytes: Vec<u8>,
    size: u64,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            name: name.into(),
            bytes,
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Exact byte length written to the entry header
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Serialize `entries` in order into a finalized tar stream.
///
/// Headers carry only name, mode, size and entry type; ownership and mtime are
/// zeroed so the same entries always produce the same bytes. Nothing is
/// returned unless every entry and the end-of-archive marker were written.
pub fn build(entries: &[ArchiveEntry]) -> Result<Vec<u8>, ArchiveError> {
    let mut builder = tar::Builder::new(Vec::new());

    for entry in entries {
        let mut header = tar::Header::new_ustar();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(ENTRY_MODE);
        header.set_size(entry.size());
        header.set_mtime(0);
        header.set_uid(0);
        header.set_gid(0);

        builder
            .append_data(&mut header, entry.name(), entry.bytes())
            .map_err(|source| ArchiveError::Entry {
                name: entry.name().to_string(),
                source,
            })?;
    }

    builder.into_inner().map_err(ArchiveError::Finish)
}
