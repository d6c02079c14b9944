//! VCF validation.
//!
//! Both plain `.vcf` and gzip/BGZF `.vcf.gz` are read; the compression
//! itself has already been checked by the time this runs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::vcf;
use tracing::debug;

use crate::core::error::ValidateError;
use crate::utils::validation::has_gzip_magic;
use crate::validators::{ValidateOptions, Validator};

pub struct VcfValidator;

impl Validator for VcfValidator {
    fn validate(
        &self,
        path: &Path,
        _options: &ValidateOptions,
    ) -> Result<Vec<String>, ValidateError> {
        let records = validate_vcf_file(path)?;

        if records == 0 {
            return Ok(vec!["VCF contains no variant records".to_string()]);
        }

        Ok(Vec::new())
    }
}

fn open(path: &Path) -> Result<Box<dyn BufRead>, ValidateError> {
    let file = File::open(path)?;

    if has_gzip_magic(path)? {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn format_error(reason: impl Into<String>) -> ValidateError {
    ValidateError::Format {
        format: "VCF",
        reason: reason.into(),
    }
}

/// REF must be one or more of `A`, `C`, `G`, `T`, `N` (either case).
fn is_valid_reference_bases(bases: &str) -> bool {
    !bases.is_empty() && bases.chars().all(|c| "ACGTNacgtn".contains(c))
}

/// INFO is `.` or `;`-separated `key[=value]` fields with non-empty keys.
/// Values may not contain `=`.
fn is_valid_info(info: &str) -> bool {
    info == "."
        || info.split(';').all(|field| match field.split_once('=') {
            Some((key, value)) => !key.is_empty() && !value.contains('='),
            None => !field.is_empty(),
        })
}

/// Parse the VCF header and fully decode every record, returning the record count.
///
/// # Errors
///
/// Returns `ValidateError::Format` if the header or any record is malformed.
pub fn validate_vcf_file(path: &Path) -> Result<u64, ValidateError> {
    let mut reader = vcf::io::Reader::new(open(path)?);

    let header = reader
        .read_header()
        .map_err(|e| format_error(format!("invalid header: {e}")))?;

    debug!(
        path = %path.display(),
        file_format = ?header.file_format(),
        contigs = header.contigs().len(),
        samples = header.sample_names().len(),
        "VCF header parsed"
    );

    let mut record = vcf::Record::default();
    let mut count: u64 = 0;

    loop {
        let line = count + 1;
        let n = reader
            .read_record(&mut record)
            .map_err(|e| format_error(format!("record {line}: {e}")))?;

        if n == 0 {
            break;
        }

        if record.reference_sequence_name().is_empty() {
            return Err(format_error(format!("record {line}: missing CHROM")));
        }

        let info_field = record.info();
        let info: &str = info_field.as_ref();
        if !is_valid_info(info) {
            return Err(format_error(format!("record {line}: invalid INFO '{info}'")));
        }

        let buf = vcf::variant::RecordBuf::try_from_variant_record(&header, &record)
            .map_err(|e| format_error(format!("record {line}: {e}")))?;

        if !is_valid_reference_bases(buf.reference_bases()) {
            return Err(format_error(format!(
                "record {line}: invalid REF '{}'",
                buf.reference_bases()
            )));
        }

        count += 1;
    }

    debug!(path = %path.display(), records = count, "VCF records parsed");

    Ok(count)
}
