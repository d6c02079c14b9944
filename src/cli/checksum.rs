use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::checks::checksum::{generate_checksum, ChecksumAlgorithm};
use crate::cli::OutputFormat;

#[derive(Args)]
pub struct ChecksumArgs {
    /// Files to checksum
    #[arg(required = true)]
    pub path: Vec<PathBuf>,

    /// Digest algorithm for the companion file
    #[arg(short, long, value_enum, default_value = "md5")]
    pub algorithm: ChecksumAlgorithm,
}

#[derive(Serialize)]
struct GeneratedChecksum {
    path: PathBuf,
    checksum_file: PathBuf,
}

/// Execute checksum subcommand
///
/// # Errors
///
/// Returns an error if any input cannot be read or a companion file cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ChecksumArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut generated = Vec::with_capacity(args.path.len());

    for path in &args.path {
        let checksum_file = generate_checksum(path, args.algorithm)
            .with_context(|| format!("Failed to checksum {}", path.display()))?;

        if verbose {
            eprintln!("Wrote {}", checksum_file.display());
        }

        generated.push(GeneratedChecksum {
            path: path.clone(),
            checksum_file,
        });
    }

    match format {
        OutputFormat::Text => {
            for g in &generated {
                println!("{}\t{}", g.path.display(), g.checksum_file.display());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&generated)?),
    }

    Ok(())
}
