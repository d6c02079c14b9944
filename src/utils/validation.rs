//! Centralized validation and helper functions.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// gzip magic bytes
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Validate that a string is a hex digest of the given length.
///
/// # Examples
///
/// ```
/// use omics_validate::utils::validation::is_valid_digest;
///
/// assert!(is_valid_digest("6aef897c3d6ff0c78aff06ac189178dd", 32));
/// assert!(!is_valid_digest("not-an-md5", 32));
/// assert!(!is_valid_digest("6aef897c3d6ff0c78aff06ac189178d", 32)); // 31 chars
/// ```
#[must_use]
pub fn is_valid_digest(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// Normalize a hex digest to lowercase.
/// Returns None if the input is not a valid digest of the given length.
#[must_use]
pub fn normalize_digest(s: &str, len: usize) -> Option<String> {
    if is_valid_digest(s, len) {
        Some(s.to_lowercase())
    } else {
        None
    }
}

/// Read up to `N` leading bytes of a file. Returns fewer bytes for short files.
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened or read.
pub fn read_head<const N: usize>(path: &Path) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut buf = Vec::with_capacity(N);
    file.take(N as u64).read_to_end(&mut buf)?;
    Ok(buf)
}

/// Read exactly `N` trailing bytes of a file.
/// Returns None if the file is shorter than `N` bytes.
///
/// # Errors
///
/// Returns an IO error if the file cannot be opened, seeked, or read.
pub fn read_tail<const N: usize>(path: &Path) -> std::io::Result<Option<[u8; N]>> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len < N as u64 {
        return Ok(None);
    }

    file.seek(SeekFrom::End(-(N as i64)))?;
    let mut buf = [0u8; N];
    file.read_exact(&mut buf)?;
    Ok(Some(buf))
}

/// Check whether a file starts with the gzip magic bytes.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read.
pub fn has_gzip_magic(path: &Path) -> std::io::Result<bool> {
    Ok(read_head::<2>(path)? == GZIP_MAGIC)
}
