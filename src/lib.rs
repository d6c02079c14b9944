//! # omics-validate
//!
//! A library for validating genomic data files before they enter a pipeline.
//!
//! Each input path is classified by its extension (`.bam`, `.vcf.gz`,
//! `.fq.gz`, ...) and then checked in order:
//!
//! - **Existence and extension**: missing paths are reported as warnings;
//!   files without an extension fail
//! - **Compression**: VCF, FASTQ and BED files must be complete gzip streams
//!   when named `.gz`, and must not be gzip otherwise
//! - **Checksums**: companion `.md5` / `.sha256` files must match the content
//! - **Format validators**: BAM, SAM, CRAM and VCF files are opened with
//!   `noodles` and must parse, contain records, and (BAM/CRAM) have an index
//!
//! ## Example
//!
//! ```rust,no_run
//! use omics_validate::{run_validate, ValidateOptions};
//! use std::path::PathBuf;
//!
//! let paths = vec![PathBuf::from("sample.bam"), PathBuf::from("calls.vcf.gz")];
//! let summary = run_validate(&paths, &ValidateOptions::default());
//!
//! for report in &summary.reports {
//!     for line in report.text_lines() {
//!         println!("{line}");
//!     }
//! }
//!
//! if !summary.all_passed() {
//!     std::process::exit(1);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: File types, errors, and reports
//! - [`checks`]: Compression and checksum checks
//! - [`validators`]: Format-specific validators and the dispatch table
//! - [`validate`]: Per-file orchestration
//! - [`cli`]: Command-line interface implementation

pub mod checks;
pub mod cli;
pub mod core;
pub mod utils;
pub mod validate;
pub mod validators;

// Re-export commonly used types for convenience
pub use core::error::ValidateError;
pub use core::file_type::{detect_file_type_and_extension, FileType};
pub use core::report::{FileOutcome, FileReport, ValidationSummary};
pub use validate::{run_validate, validate_file};
pub use validators::{ValidateOptions, Validator};
