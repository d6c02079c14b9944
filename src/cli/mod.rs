//! Command-line interface for omics-validate.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **validate**: Validate one or more genomic data files
//! - **checksum**: Write companion `.md5` / `.sha256` files
//!
//! ## Usage
//!
//! ```text
//! # Validate a set of files
//! omics-validate validate sample.bam calls.vcf.gz reads_R1.fq.gz
//!
//! # Decode CRAM records against a reference
//! omics-validate validate sample.cram --cram-reference GRCh38.fa
//!
//! # JSON output for pipelines
//! omics-validate --format json validate *.bam
//!
//! # Generate checksums, then have validate verify them
//! omics-validate checksum sample.bam --algorithm sha256
//! ```

use clap::{Parser, Subcommand};

pub mod checksum;
pub mod validate;

#[derive(Parser)]
#[command(name = "omics-validate")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Validate genomic data files by type, compression and checksum")]
#[command(
    long_about = "omics-validate infers each file's genomic data type from its extension and runs the matching checks:\n- BAM/CRAM: quickcheck, at least one record, index present\n- SAM: header and first record parse\n- VCF: header and every record parse\n- VCF/FASTQ/BED: gzip integrity when compressed\n- Any file: companion .md5/.sha256 checksums\n\nThe exit code is non-zero if any file fails."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate genomic data files
    Validate(validate::ValidateArgs),

    /// Generate companion checksum files
    Checksum(checksum::ChecksumArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
