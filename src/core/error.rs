use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No such file or directory")]
    NotFound(PathBuf),

    #[error("File {0} does not have a valid extension.")]
    NoExtension(PathBuf),

    #[error("Compression check failed. {0}")]
    Compression(String),

    #[error("Checksum mismatch ({algorithm}): expected {expected}, found {actual}")]
    ChecksumMismatch {
        algorithm: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid checksum file {path}: {reason}")]
    InvalidChecksumFile { path: PathBuf, reason: String },

    #[error("{tool} check failed. {reason}")]
    Quickcheck { tool: &'static str, reason: String },

    #[error("{tool} check failed. No reads in {path}")]
    NoRecords { tool: &'static str, path: PathBuf },

    #[error("{tool} index check failed. Index file for {path} could not be opened or does not exist.")]
    IndexMissing { tool: &'static str, path: PathBuf },

    #[error("Invalid {format} format: {reason}")]
    Format { format: &'static str, reason: String },

    #[error("noodles error: {0}")]
    Noodles(String),
}

impl ValidateError {
    /// Errors in the "not found" class are reported as warnings instead of failures.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::IndexMissing { .. })
    }
}
