//! Companion checksum files.
//!
//! A file `sample.bam` may carry `sample.bam.md5` and/or `sample.bam.sha256`
//! next to it, in `md5sum`/`sha256sum` format:
//!
//! ```text
//! 6aef897c3d6ff0c78aff06ac189178dd  sample.bam
//! ```
//!
//! Only the leading digest is compared; the file name column is optional.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::core::error::ValidateError;
use crate::utils::validation::normalize_digest;

/// Supported checksum algorithms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ChecksumAlgorithm {
    Md5,
    Sha256,
}

impl ChecksumAlgorithm {
    pub const ALL: [Self; 2] = [Self::Md5, Self::Sha256];

    /// Extension of the companion file, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
        }
    }

    /// Length of the hex digest.
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            Self::Md5 => 32,
            Self::Sha256 => 64,
        }
    }

    /// Path of the companion file for `path`.
    #[must_use]
    pub fn companion_path(self, path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(self.extension());
        PathBuf::from(name)
    }
}

impl std::fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Compute the lowercase hex digest of a file's content.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read.
pub fn compute_checksum(path: &Path, algorithm: ChecksumAlgorithm) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);

    match algorithm {
        ChecksumAlgorithm::Md5 => {
            let mut context = md5::Context::new();
            io::copy(&mut reader, &mut context)?;
            Ok(format!("{:x}", context.compute()))
        }
        ChecksumAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            io::copy(&mut reader, &mut hasher)?;
            Ok(format!("{:x}", hasher.finalize()))
        }
    }
}

/// Parse the expected digest from a companion file.
fn read_expected(companion: &Path, algorithm: ChecksumAlgorithm) -> Result<String, ValidateError> {
    let content = std::fs::read_to_string(companion)?;

    let token = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.split_whitespace().next())
        .ok_or_else(|| ValidateError::InvalidChecksumFile {
            path: companion.to_path_buf(),
            reason: "file is empty".to_string(),
        })?;

    normalize_digest(token, algorithm.hex_len()).ok_or_else(|| {
        ValidateError::InvalidChecksumFile {
            path: companion.to_path_buf(),
            reason: format!(
                "expected a {}-character hex {algorithm} digest, found '{token}'",
                algorithm.hex_len()
            ),
        }
    })
}

/// Verify every companion checksum file present for `path`.
///
/// Files without companions pass without being read.
///
/// # Errors
///
/// Returns `ValidateError::ChecksumMismatch` if a digest does not match,
/// `ValidateError::InvalidChecksumFile` if a companion is malformed, or
/// `ValidateError::Io` if a file cannot be read.
pub fn validate_checksums(path: &Path) -> Result<(), ValidateError> {
    for algorithm in ChecksumAlgorithm::ALL {
        let companion = algorithm.companion_path(path);
        if !companion.is_file() {
            continue;
        }

        let expected = read_expected(&companion, algorithm)?;
        let actual = compute_checksum(path, algorithm)?;

        if expected != actual {
            return Err(ValidateError::ChecksumMismatch {
                algorithm: algorithm.to_string(),
                expected,
                actual,
            });
        }

        debug!(path = %path.display(), %algorithm, "checksum verified");
    }

    Ok(())
}

/// Write a companion checksum file for `path` and return its location.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read or the companion cannot be written.
pub fn generate_checksum(path: &Path, algorithm: ChecksumAlgorithm) -> io::Result<PathBuf> {
    let digest = compute_checksum(path, algorithm)?;
    let companion = algorithm.companion_path(path);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    std::fs::write(&companion, format!("{digest}  {file_name}\n"))?;
    Ok(companion)
}

#[cfg(test)]
mod tests {
    use super::*;

    // md5("hello\n") and sha256("hello\n")
    const HELLO_MD5: &str = "b1946ac92492d2347c6235b4d2611184";
    const HELLO_SHA256: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    fn hello_file() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, b"hello\n").unwrap();
        (dir, path)
    }

    #[test]
    fn test_compute_checksum() {
        let (_dir, path) = hello_file();
        assert_eq!(
            compute_checksum(&path, ChecksumAlgorithm::Md5).unwrap(),
            HELLO_MD5
        );
        assert_eq!(
            compute_checksum(&path, ChecksumAlgorithm::Sha256).unwrap(),
            HELLO_SHA256
        );
    }

    #[test]
    fn test_companion_path() {
        assert_eq!(
            ChecksumAlgorithm::Md5.companion_path(Path::new("/data/a.vcf.gz")),
            PathBuf::from("/data/a.vcf.gz.md5")
        );
    }

    #[test]
    fn test_no_companion_passes() {
        let (_dir, path) = hello_file();
        assert!(validate_checksums(&path).is_ok());
    }

    #[test]
    fn test_matching_companion() {
        let (_dir, path) = hello_file();
        std::fs::write(
            ChecksumAlgorithm::Md5.companion_path(&path),
            format!("{}  hello.txt\n", HELLO_MD5.to_uppercase()),
        )
        .unwrap();
        std::fs::write(ChecksumAlgorithm::Sha256.companion_path(&path), HELLO_SHA256).unwrap();
        assert!(validate_checksums(&path).is_ok());
    }

    #[test]
    fn test_mismatched_companion() {
        let (_dir, path) = hello_file();
        std::fs::write(
            ChecksumAlgorithm::Md5.companion_path(&path),
            "00000000000000000000000000000000  hello.txt\n",
        )
        .unwrap();

        match validate_checksums(&path) {
            Err(ValidateError::ChecksumMismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, "00000000000000000000000000000000");
                assert_eq!(actual, HELLO_MD5);
            }
            other => panic!("Expected checksum mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_companion() {
        let (_dir, path) = hello_file();
        std::fs::write(ChecksumAlgorithm::Sha256.companion_path(&path), HELLO_MD5).unwrap();
        assert!(matches!(
            validate_checksums(&path),
            Err(ValidateError::InvalidChecksumFile { .. })
        ));

        std::fs::write(ChecksumAlgorithm::Sha256.companion_path(&path), "\n\n").unwrap();
        assert!(matches!(
            validate_checksums(&path),
            Err(ValidateError::InvalidChecksumFile { .. })
        ));
    }

    #[test]
    fn test_generate_then_validate() {
        let (_dir, path) = hello_file();
        let companion = generate_checksum(&path, ChecksumAlgorithm::Md5).unwrap();
        assert_eq!(
            std::fs::read_to_string(&companion).unwrap(),
            format!("{HELLO_MD5}  hello.txt\n")
        );
        assert!(validate_checksums(&path).is_ok());

        std::fs::write(&path, b"changed\n").unwrap();
        assert!(validate_checksums(&path).is_err());
    }
}
