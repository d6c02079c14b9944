//! Compression integrity check for compressible types (VCF, FASTQ, BED).
//!
//! A `.gz` extension requires a gzip stream that decodes end to end, which
//! also verifies the CRC32 and size trailer of every member. Any other
//! extension requires that the content is *not* gzip.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::debug;

use crate::core::error::ValidateError;
use crate::utils::validation::{read_head, GZIP_MAGIC};

/// Check that the file's compression agrees with its extension.
///
/// # Errors
///
/// Returns `ValidateError::Compression` if a `.gz` file is not a complete,
/// well-formed gzip stream or if an uncompressed extension holds gzip data.
/// Returns `ValidateError::Io` if the file cannot be opened.
pub fn check_compressed(path: &Path, extension: &str) -> Result<(), ValidateError> {
    let head = read_head::<2>(path)?;
    let is_gzip = head == GZIP_MAGIC;

    #[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
    let gz_extension = extension.ends_with(".gz");

    if gz_extension {
        if !is_gzip {
            return Err(ValidateError::Compression(format!(
                "File has {extension} extension but is not gzip compressed"
            )));
        }
        let bytes = verify_gzip_stream(path)?;
        debug!(path = %path.display(), bytes, "gzip stream decoded");
    } else if is_gzip {
        return Err(ValidateError::Compression(format!(
            "File has {extension} extension but is gzip compressed"
        )));
    }

    Ok(())
}

/// Decode the whole gzip stream, returning the number of uncompressed bytes.
fn verify_gzip_stream(path: &Path) -> Result<u64, ValidateError> {
    let file = File::open(path)?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(file));

    io::copy(&mut decoder, &mut io::sink()).map_err(|e| {
        ValidateError::Compression(format!("gzip stream is corrupt or truncated: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn write_temp(name: &str, data: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, data).unwrap();
        (dir, path)
    }

    #[test]
    fn test_valid_gzip() {
        let (_dir, path) = write_temp("calls.vcf.gz", &gzip(b"##fileformat=VCFv4.2\n"));
        assert!(check_compressed(&path, ".vcf.gz").is_ok());
    }

    #[test]
    fn test_multi_member_gzip() {
        let mut data = gzip(b"@r1\nACGT\n+\nIIII\n");
        data.extend(gzip(b"@r2\nACGT\n+\nIIII\n"));
        let (_dir, path) = write_temp("reads.fq.gz", &data);
        assert!(check_compressed(&path, ".fq.gz").is_ok());
    }

    #[test]
    fn test_truncated_gzip() {
        let data = gzip(&b"chr1\t0\t100\n".repeat(1000));
        let (_dir, path) = write_temp("regions.bed.gz", &data[..data.len() / 2]);
        let err = check_compressed(&path, ".bed.gz").unwrap_err();
        assert!(matches!(err, ValidateError::Compression(_)));
    }

    #[test]
    fn test_corrupt_crc() {
        let mut data = gzip(b"chr1\t0\t100\n");
        let crc_offset = data.len() - 8;
        data[crc_offset] ^= 0xff;
        let (_dir, path) = write_temp("regions.bed.gz", &data);
        let err = check_compressed(&path, ".bed.gz").unwrap_err();
        assert!(matches!(err, ValidateError::Compression(_)));
    }

    #[test]
    fn test_gz_extension_without_gzip_content() {
        let (_dir, path) = write_temp("calls.vcf.gz", b"##fileformat=VCFv4.2\n");
        let err = check_compressed(&path, ".vcf.gz").unwrap_err();
        assert!(err.to_string().contains("is not gzip compressed"));
    }

    #[test]
    fn test_plain_extension_with_gzip_content() {
        let (_dir, path) = write_temp("calls.vcf", &gzip(b"##fileformat=VCFv4.2\n"));
        let err = check_compressed(&path, ".vcf").unwrap_err();
        assert!(err.to_string().contains("is gzip compressed"));
    }

    #[test]
    fn test_plain_extension_with_plain_content() {
        let (_dir, path) = write_temp("regions.bed", b"chr1\t0\t100\n");
        assert!(check_compressed(&path, ".bed").is_ok());
    }
}
