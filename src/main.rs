//! dependr - keeps dependabot.yml in sync with the ecosystems in a repository
//!
//! The tool walks a git repository, detects package manifests and appends an
//! update entry for every ecosystem/directory pair the dependabot
//! configuration does not declare yet.

use clap::Parser;
use dependr::cli::CliArgs;
use dependr::logging;
use dependr::orchestrator::Orchestrator;
use dependr::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    logging::init(args.verbose, args.quiet, !args.no_color);

    // Run the main logic and handle errors
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<()> {
    if args.verbose {
        eprintln!("dependr v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("Target: {}", args.path().display());
        if args.is_dry_run() {
            eprintln!("Mode: dry-run");
        }
    }

    let report = Orchestrator::new(args.run_options()).run()?;

    let formatter = create_formatter(&OutputConfig::from(&args));

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}
