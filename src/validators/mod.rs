//! Type-specific validators and the dispatch table that routes to them.
//!
//! | File type   | Validator          | Checks                                       |
//! |-------------|--------------------|----------------------------------------------|
//! | `file-bam`  | [`bam::BamValidator`]   | quickcheck, first record, `.bai`/`.csi` index |
//! | `file-sam`  | [`sam::SamValidator`]   | header, first record                          |
//! | `file-cram` | [`cram::CramValidator`] | quickcheck, first record, `.crai` index       |
//! | `file-vcf`  | [`vcf::VcfValidator`]   | header, every record                          |
//!
//! Other recognized types (FASTA, FASTQ, BED, Python) and unknown files have
//! no validator; they only receive the compression and checksum checks.

use std::path::{Path, PathBuf};

use crate::core::error::ValidateError;
use crate::core::file_type::FileType;

pub mod bam;
pub mod cram;
pub mod sam;
pub mod vcf;

/// Settings shared by all validators for one run.
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// FASTA reference used to decode CRAM records
    pub cram_reference: Option<PathBuf>,
}

/// A format-specific validity check.
pub trait Validator: Sync {
    /// Validate the file at `path`, returning non-fatal warnings.
    ///
    /// # Errors
    ///
    /// Returns a `ValidateError` describing the first failed check.
    fn validate(&self, path: &Path, options: &ValidateOptions)
        -> Result<Vec<String>, ValidateError>;
}

/// Dispatch table: the validator for a file type, if it has one.
#[must_use]
pub fn validator_for(file_type: FileType) -> Option<&'static dyn Validator> {
    match file_type {
        FileType::Bam => Some(&bam::BamValidator),
        FileType::Sam => Some(&sam::SamValidator),
        FileType::Cram => Some(&cram::CramValidator),
        FileType::Vcf => Some(&vcf::VcfValidator),
        FileType::Fasta | FileType::Fastq | FileType::Bed | FileType::Py | FileType::Unknown => {
            None
        }
    }
}

/// Map a noodles IO error into a quickcheck failure for `tool`.
pub(crate) fn quickcheck_error(tool: &'static str, path: &Path, e: &std::io::Error) -> ValidateError {
    ValidateError::Quickcheck {
        tool,
        reason: format!("{}: {e}", path.display()),
    }
}
