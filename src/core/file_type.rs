use std::path::Path;

use serde::{Deserialize, Serialize};

/// Genomic data type inferred from a file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "file-bam")]
    Bam,
    #[serde(rename = "file-sam")]
    Sam,
    #[serde(rename = "file-cram")]
    Cram,
    #[serde(rename = "file-vcf")]
    Vcf,
    #[serde(rename = "file-fasta")]
    Fasta,
    #[serde(rename = "file-fastq")]
    Fastq,
    #[serde(rename = "file-bed")]
    Bed,
    #[serde(rename = "file-py")]
    Py,
    /// The file type is not listed in [`FILE_TYPES`]
    #[serde(rename = "file-unknown")]
    Unknown,
}

/// Supported data types and the extensions that identify them.
///
/// Extensions are lowercase and include the leading dot. Multi-part
/// extensions (`.vcf.gz`) are matched as a whole.
pub const FILE_TYPES: &[(FileType, &[&str])] = &[
    (FileType::Bam, &[".bam"]),
    (FileType::Sam, &[".sam"]),
    (FileType::Cram, &[".cram"]),
    (FileType::Vcf, &[".vcf", ".vcf.gz"]),
    (FileType::Fasta, &[".fasta", ".fa"]),
    (FileType::Fastq, &[".fastq", ".fq.gz", ".fq", ".fastq.gz"]),
    (FileType::Bed, &[".bed", ".bed.gz"]),
    (FileType::Py, &[".py"]),
];

impl FileType {
    /// The `file-*` tag used in reports.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Bam => "file-bam",
            Self::Sam => "file-sam",
            Self::Cram => "file-cram",
            Self::Vcf => "file-vcf",
            Self::Fasta => "file-fasta",
            Self::Fastq => "file-fastq",
            Self::Bed => "file-bed",
            Self::Py => "file-py",
            Self::Unknown => "file-unknown",
        }
    }

    /// Whether files of this type may be gzip compressed and get a compression check.
    #[must_use]
    pub fn is_compressible(self) -> bool {
        matches!(self, Self::Vcf | Self::Fastq | Self::Bed)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Look up an already lowercased extension (with leading dot) in [`FILE_TYPES`].
#[must_use]
pub fn check_extension(extension: &str) -> FileType {
    FILE_TYPES
        .iter()
        .find(|(_, extensions)| extensions.contains(&extension))
        .map_or(FileType::Unknown, |(file_type, _)| *file_type)
}

/// Split the final path component into its `.`-separated suffixes.
///
/// Leading dots do not start a suffix (`.bashrc` has none), and a name ending
/// in a dot has no suffixes at all. Non-UTF-8 bytes are replaced, so the
/// suffixes of such names are still found.
#[must_use]
pub fn suffixes(path: &Path) -> Vec<String> {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return Vec::new();
    };

    if name.ends_with('.') {
        return Vec::new();
    }

    name.trim_start_matches('.')
        .split('.')
        .skip(1)
        .map(|part| format!(".{part}"))
        .collect()
}

/// Infer the file type and the matched extension from a path.
///
/// Suffix chains are tried longest first, so `reads.fq.gz` is matched as
/// `.fq.gz` rather than by its last suffix alone. When nothing matches, the
/// full lowercased suffix chain is returned with [`FileType::Unknown`].
#[must_use]
pub fn detect_file_type_and_extension(path: &Path) -> (FileType, String) {
    let suffixes: Vec<String> = suffixes(path).iter().map(|s| s.to_lowercase()).collect();

    for start in 0..suffixes.len() {
        let candidate = suffixes[start..].concat();
        let file_type = check_extension(&candidate);
        if file_type != FileType::Unknown {
            return (file_type, candidate);
        }
    }

    (FileType::Unknown, suffixes.concat())
}
