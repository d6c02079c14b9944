//! Orchestration: validate a list of paths and classify each outcome.
//!
//! Per file, in order: existence, extension, compression (compressible types
//! only), companion checksums, then the type-specific validator. The first
//! failing step decides the outcome.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::checks::checksum::validate_checksums;
use crate::checks::compression::check_compressed;
use crate::core::error::ValidateError;
use crate::core::file_type::{detect_file_type_and_extension, FileType};
use crate::core::report::{FileOutcome, FileReport, ValidationSummary};
use crate::validators::{validator_for, ValidateOptions};

/// Check that the input path exists.
///
/// # Errors
///
/// Returns `ValidateError::NotFound` if it does not.
pub fn path_exists(path: &Path) -> Result<(), ValidateError> {
    if path.exists() {
        Ok(())
    } else {
        Err(ValidateError::NotFound(path.to_path_buf()))
    }
}

/// Validate a single file whose type and extension are already known.
///
/// Returns the non-fatal warnings produced by the checks.
///
/// # Errors
///
/// Returns the `ValidateError` of the first failed check.
pub fn validate_file(
    path: &Path,
    file_type: FileType,
    extension: &str,
    options: &ValidateOptions,
) -> Result<Vec<String>, ValidateError> {
    path_exists(path)?;

    if extension.is_empty() {
        return Err(ValidateError::NoExtension(path.to_path_buf()));
    }

    if file_type.is_compressible() {
        check_compressed(path, extension)?;
    }

    validate_checksums(path)?;

    match validator_for(file_type) {
        Some(validator) => validator.validate(path, options),
        None => {
            debug!(path = %path.display(), %file_type, "no format validator, skipping");
            Ok(Vec::new())
        }
    }
}

/// Validate one path end to end and classify the result.
#[must_use]
pub fn validate_path(path: &Path, options: &ValidateOptions) -> FileReport {
    let (file_type, extension) = detect_file_type_and_extension(path);
    debug!(path = %path.display(), %file_type, %extension, "detected file type");

    let outcome = match validate_file(path, file_type, &extension, options) {
        Ok(warnings) => FileOutcome::Passed { warnings },
        Err(e @ ValidateError::NotFound(_)) => {
            warn!(path = %path.display(), "input file does not exist");
            FileOutcome::Skipped {
                reason: e.to_string(),
            }
        }
        Err(e) if e.is_not_found() => FileOutcome::Passed {
            warnings: vec![e.to_string()],
        },
        Err(e) => FileOutcome::Failed {
            error: e.to_string(),
        },
    };

    FileReport {
        path: path.to_path_buf(),
        file_type,
        extension,
        outcome,
    }
}

/// Validate every path, in order.
#[must_use]
pub fn run_validate(paths: &[PathBuf], options: &ValidateOptions) -> ValidationSummary {
    ValidationSummary {
        reports: paths.iter().map(|p| validate_path(p, options)).collect(),
    }
}
