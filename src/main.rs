use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod checks;
mod cli;
mod core;
mod utils;
mod validate;
mod validators;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("omics_validate=debug,info")
    } else {
        EnvFilter::new("omics_validate=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Validate(args) => {
            if !cli::validate::run(args, cli.format, cli.verbose)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        cli::Commands::Checksum(args) => {
            cli::checksum::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
