//! SAM validation: the header parses and the first record is well formed.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use noodles::sam::{self, alignment::RecordBuf};
use tracing::debug;

use crate::core::error::ValidateError;
use crate::validators::{quickcheck_error, ValidateOptions, Validator};

const TOOL: &str = "sam";

pub struct SamValidator;

impl Validator for SamValidator {
    fn validate(
        &self,
        path: &Path,
        _options: &ValidateOptions,
    ) -> Result<Vec<String>, ValidateError> {
        validate_sam_file(path)?;
        Ok(Vec::new())
    }
}

/// Parse the SAM header and the first alignment record.
///
/// # Errors
///
/// Returns `ValidateError::Quickcheck` if the header or first record is
/// malformed, or `ValidateError::NoRecords` if the file has no records.
pub fn validate_sam_file(path: &Path) -> Result<(), ValidateError> {
    let mut reader = File::open(path)
        .map(BufReader::new)
        .map(sam::io::Reader::new)?;

    let header = reader
        .read_header()
        .map_err(|e| quickcheck_error(TOOL, path, &e))?;

    debug!(
        path = %path.display(),
        reference_sequences = header.reference_sequences().len(),
        "SAM header parsed"
    );

    let mut record = RecordBuf::default();
    let n = reader
        .read_record_buf(&header, &mut record)
        .map_err(|e| quickcheck_error(TOOL, path, &e))?;

    if n == 0 {
        return Err(ValidateError::NoRecords {
            tool: TOOL,
            path: path.to_path_buf(),
        });
    }

    Ok(())
}
