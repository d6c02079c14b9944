//! BAM validation: quickcheck, first record, and index.
//!
//! The quickcheck mirrors `samtools quickcheck`: the file must open as BAM,
//! its header must parse, and the last BGZF block must be the standard EOF
//! marker (a missing marker means the file was truncated).

use std::fs::File;
use std::path::Path;

use noodles::bam;
use tracing::debug;

use crate::core::error::ValidateError;
use crate::utils::validation::read_tail;
use crate::validators::{quickcheck_error, ValidateOptions, Validator};

const TOOL: &str = "bam";

/// The empty BGZF block that terminates every well-formed BGZF file.
pub const BGZF_EOF: [u8; 28] = [
    0x1f, 0x8b, 0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff, 0x06, 0x00, 0x42, 0x43, 0x02,
    0x00, 0x1b, 0x00, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub struct BamValidator;

impl Validator for BamValidator {
    fn validate(
        &self,
        path: &Path,
        _options: &ValidateOptions,
    ) -> Result<Vec<String>, ValidateError> {
        validate_bam_file(path)?;
        check_bam_index(path)?;
        Ok(Vec::new())
    }
}

/// Check that a BGZF file ends with the EOF marker block.
///
/// # Errors
///
/// Returns `ValidateError::Quickcheck` if the marker is missing.
pub fn check_bgzf_eof(tool: &'static str, path: &Path) -> Result<(), ValidateError> {
    match read_tail::<28>(path)? {
        Some(tail) if tail == BGZF_EOF => Ok(()),
        _ => Err(ValidateError::Quickcheck {
            tool,
            reason: format!("{} is missing the BGZF EOF marker (truncated file?)", path.display()),
        }),
    }
}

/// Quickcheck the BAM file and confirm it holds at least one record.
///
/// # Errors
///
/// Returns `ValidateError::Quickcheck` if the file is not a complete BAM, or
/// `ValidateError::NoRecords` if it has no alignment records.
pub fn validate_bam_file(path: &Path) -> Result<(), ValidateError> {
    check_bgzf_eof(TOOL, path)?;

    let mut reader = File::open(path).map(bam::io::Reader::new)?;

    let header = reader
        .read_header()
        .map_err(|e| quickcheck_error(TOOL, path, &e))?;

    debug!(
        path = %path.display(),
        reference_sequences = header.reference_sequences().len(),
        "BAM header parsed"
    );

    let mut record = bam::Record::default();
    let n = reader
        .read_record(&mut record)
        .map_err(|e| quickcheck_error(TOOL, path, &e))?;

    if n == 0 {
        return Err(ValidateError::NoRecords {
            tool: TOOL,
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Check that a `.bai` or `.csi` index next to the BAM can be opened.
///
/// # Errors
///
/// Returns `ValidateError::IndexMissing` if no index can be read.
pub fn check_bam_index(path: &Path) -> Result<(), ValidateError> {
    bam::io::indexed_reader::Builder::default()
        .build_from_path(path)
        .map(|_| ())
        .map_err(|e| {
            debug!(path = %path.display(), error = %e, "BAM index could not be opened");
            ValidateError::IndexMissing {
                tool: TOOL,
                path: path.to_path_buf(),
            }
        })
}
