//! Core data types for file validation.
//!
//! - [`FileType`](file_type::FileType): genomic data type inferred from a file name
//! - [`ValidateError`](error::ValidateError): every failure a check can raise
//! - [`FileReport`](report::FileReport) / [`ValidationSummary`](report::ValidationSummary):
//!   per-file and per-run results
//!
//! ## Extension Table
//!
//! | Tag          | Extensions                              |
//! |--------------|-----------------------------------------|
//! | `file-bam`   | `.bam`                                  |
//! | `file-sam`   | `.sam`                                  |
//! | `file-cram`  | `.cram`                                 |
//! | `file-vcf`   | `.vcf`, `.vcf.gz`                       |
//! | `file-fasta` | `.fasta`, `.fa`                         |
//! | `file-fastq` | `.fastq`, `.fq.gz`, `.fq`, `.fastq.gz`  |
//! | `file-bed`   | `.bed`, `.bed.gz`                       |
//! | `file-py`    | `.py`                                   |

pub mod error;
pub mod file_type;
pub mod report;
