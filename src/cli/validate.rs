use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::core::report::{FileReport, ValidationSummary};
use crate::validate::run_validate;
use crate::validators::ValidateOptions;

#[derive(Args)]
pub struct ValidateArgs {
    /// Files to validate (type is inferred from the extension)
    #[arg(required = true)]
    pub path: Vec<PathBuf>,

    /// Reference FASTA (with .fai) used to decode CRAM records
    #[arg(long)]
    pub cram_reference: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonSummary<'a> {
    checked_at: chrono::DateTime<chrono::Utc>,
    passed: usize,
    skipped: usize,
    failed: usize,
    files: &'a [FileReport],
}

/// Execute validate subcommand
///
/// Returns whether every file passed (skipped paths do not count as failures).
///
/// # Errors
///
/// Returns an error if the CRAM reference does not exist or the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ValidateArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<bool> {
    if let Some(reference) = &args.cram_reference {
        if !reference.is_file() {
            anyhow::bail!("CRAM reference not found: {}", reference.display());
        }
    }

    let options = ValidateOptions {
        cram_reference: args.cram_reference.clone(),
    };

    let summary = run_validate(&args.path, &options);

    match format {
        OutputFormat::Text => print_text_results(&summary, verbose),
        OutputFormat::Json => print_json_results(&summary)?,
    }

    Ok(summary.all_passed())
}

fn print_text_results(summary: &ValidationSummary, verbose: bool) {
    for report in &summary.reports {
        for line in report.text_lines() {
            println!("{line}");
        }
    }

    if verbose {
        eprintln!(
            "Checked {} files: {} passed, {} skipped, {} failed",
            summary.reports.len(),
            summary.passed(),
            summary.skipped(),
            summary.failed()
        );
    }
}

fn print_json_results(summary: &ValidationSummary) -> anyhow::Result<()> {
    let output = JsonSummary {
        checked_at: chrono::Utc::now(),
        passed: summary.passed(),
        skipped: summary.skipped(),
        failed: summary.failed(),
        files: &summary.reports,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
