//! CRAM validation: quickcheck, first record, and `.crai` index.
//!
//! Record decoding may need the reference the file was compressed against;
//! pass it with `--cram-reference` (a FASTA with a `.fai` index).

use std::path::Path;

use noodles::{cram, fasta};
use tracing::debug;

use crate::core::error::ValidateError;
use crate::utils::validation::{read_head, read_tail};
use crate::validators::{quickcheck_error, ValidateOptions, Validator};

const TOOL: &str = "cram";

/// CRAM file definition magic.
pub const CRAM_MAGIC: &[u8; 4] = b"CRAM";

/// EOF container written at the end of every CRAM 3.x file.
pub const CRAM_V3_EOF: [u8; 38] = [
    0x0f, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x0f, 0xe0, 0x45, 0x4f, 0x46, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x05, 0xbd, 0xd9, 0x4f, 0x00, 0x01, 0x00, 0x06, 0x06, 0x01, 0x00,
    0x01, 0x00, 0x01, 0x00, 0xee, 0x63, 0x01, 0x4b,
];

pub struct CramValidator;

impl Validator for CramValidator {
    fn validate(
        &self,
        path: &Path,
        options: &ValidateOptions,
    ) -> Result<Vec<String>, ValidateError> {
        validate_cram_file(path, options.cram_reference.as_deref())?;
        check_cram_index(path)?;
        Ok(Vec::new())
    }
}

/// Check the file definition magic and, for CRAM 3.x, the EOF container.
///
/// # Errors
///
/// Returns `ValidateError::Quickcheck` if the magic or EOF container is wrong.
pub fn check_cram_framing(path: &Path) -> Result<(), ValidateError> {
    let head = read_head::<6>(path)?;
    if head.len() < 6 || &head[..4] != CRAM_MAGIC {
        return Err(ValidateError::Quickcheck {
            tool: TOOL,
            reason: format!("{} is not a CRAM file", path.display()),
        });
    }

    let major = head[4];
    debug!(path = %path.display(), major, minor = head[5], "CRAM version");

    // CRAM 2.x uses a different EOF container; only 3.x is checked
    if major >= 3 {
        match read_tail::<38>(path)? {
            Some(tail) if tail == CRAM_V3_EOF => {}
            _ => {
                return Err(ValidateError::Quickcheck {
                    tool: TOOL,
                    reason: format!(
                        "{} is missing the CRAM EOF container (truncated file?)",
                        path.display()
                    ),
                })
            }
        }
    }

    Ok(())
}

fn reader_builder(reference: Option<&Path>) -> Result<cram::io::reader::Builder, ValidateError> {
    let mut builder = cram::io::reader::Builder::default();

    if let Some(reference) = reference {
        let fasta_reader = fasta::io::indexed_reader::Builder::default()
            .build_from_path(reference)
            .map_err(|e| {
                ValidateError::Noodles(format!(
                    "could not open CRAM reference {}: {e}",
                    reference.display()
                ))
            })?;
        let adapter = fasta::repository::adapters::IndexedReader::new(fasta_reader);
        builder = builder.set_reference_sequence_repository(fasta::Repository::new(adapter));
    }

    Ok(builder)
}

/// Quickcheck the CRAM file and confirm it holds at least one record.
///
/// # Errors
///
/// Returns `ValidateError::Quickcheck` if the file is not a complete CRAM or
/// a record cannot be decoded, or `ValidateError::NoRecords` if it is empty.
pub fn validate_cram_file(path: &Path, reference: Option<&Path>) -> Result<(), ValidateError> {
    check_cram_framing(path)?;

    let mut reader = reader_builder(reference)?.build_from_path(path)?;

    reader
        .read_file_definition()
        .map_err(|e| quickcheck_error(TOOL, path, &e))?;

    let header = reader
        .read_file_header()
        .map_err(|e| quickcheck_error(TOOL, path, &e))?;

    match reader.records(&header).next() {
        Some(Ok(_)) => Ok(()),
        Some(Err(e)) => Err(quickcheck_error(TOOL, path, &e)),
        None => Err(ValidateError::NoRecords {
            tool: TOOL,
            path: path.to_path_buf(),
        }),
    }
}

/// Check that a `.crai` index next to the CRAM can be opened.
///
/// # Errors
///
/// Returns `ValidateError::IndexMissing` if the index cannot be read.
pub fn check_cram_index(path: &Path) -> Result<(), ValidateError> {
    cram::io::indexed_reader::Builder::default()
        .build_from_path(path)
        .map(|_| ())
        .map_err(|e| {
            debug!(path = %path.display(), error = %e, "CRAM index could not be opened");
            ValidateError::IndexMissing {
                tool: TOOL,
                path: path.to_path_buf(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use noodles::sam::{self, alignment::io::Write as _, alignment::RecordBuf};
    use std::fs::File;
    use std::io::Write;

    fn write_cram(path: &Path, records: usize) {
        let header = sam::Header::default();
        let mut writer = cram::io::Writer::new(File::create(path).unwrap());
        writer.write_header(&header).unwrap();
        for _ in 0..records {
            writer
                .write_alignment_record(&header, &RecordBuf::default())
                .unwrap();
        }
        writer.finish(&header).unwrap();
    }

    /// Empty CRAI: a gzip stream with no index lines.
    fn empty_crai() -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"").unwrap();
        encoder.finish().unwrap()
    }

    fn write_reference(dir: &Path) -> std::path::PathBuf {
        let fasta = dir.join("ref.fa");
        std::fs::write(&fasta, ">sq0\nACGTACGT\n").unwrap();
        std::fs::write(dir.join("ref.fa.fai"), "sq0\t8\t5\t8\t9\n").unwrap();
        fasta
    }

    #[test]
    fn test_valid_cram_with_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cram");
        write_cram(&path, 2);
        std::fs::write(dir.path().join("sample.cram.crai"), empty_crai()).unwrap();

        let warnings = CramValidator
            .validate(&path, &ValidateOptions::default())
            .unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_cram_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cram");
        write_cram(&path, 1);

        assert!(validate_cram_file(&path, None).is_ok());
        assert!(check_cram_index(&path).unwrap_err().is_not_found());
    }

    #[test]
    fn test_valid_cram_with_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cram");
        write_cram(&path, 1);
        let fasta = write_reference(dir.path());

        assert!(validate_cram_file(&path, Some(&fasta)).is_ok());
    }

    #[test]
    fn test_unreadable_reference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cram");
        write_cram(&path, 1);

        let err = validate_cram_file(&path, Some(Path::new("/nonexistent/ref.fa"))).unwrap_err();
        assert!(matches!(err, ValidateError::Noodles(_)));
    }

    #[test]
    fn test_cram_without_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.cram");
        write_cram(&path, 0);

        assert!(matches!(
            validate_cram_file(&path, None),
            Err(ValidateError::NoRecords { .. })
        ));
    }

    #[test]
    fn test_not_a_cram() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.cram");
        std::fs::write(&path, b"BAM\x01").unwrap();

        let err = validate_cram_file(&path, None).unwrap_err();
        assert!(err.to_string().contains("is not a CRAM file"));
    }

    #[test]
    fn test_missing_eof_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.cram");
        let mut data = b"CRAM\x03\x00".to_vec();
        data.extend([0u8; 20]);
        data.extend([0u8; 64]);
        std::fs::write(&path, &data).unwrap();

        let err = check_cram_framing(&path).unwrap_err();
        assert!(err.to_string().contains("EOF container"));
    }

    #[test]
    fn test_framing_ok_with_eof_container() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("framed.cram");
        let mut data = b"CRAM\x03\x01".to_vec();
        data.extend([0u8; 20]);
        data.extend(CRAM_V3_EOF);
        std::fs::write(&path, &data).unwrap();

        assert!(check_cram_framing(&path).is_ok());
    }

    #[test]
    fn test_missing_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.cram");
        std::fs::write(&path, b"CRAM\x03\x01").unwrap();

        assert!(check_cram_index(&path).unwrap_err().is_not_found());
    }
}
