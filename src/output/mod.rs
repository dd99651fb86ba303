//! Rendering of a [`ScanReport`] on stdout
//!
//! Text is the default and lists the entries a run added. JSON carries
//! the same facts for scripts and CI jobs.

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::cli::CliArgs;
use crate::orchestrator::ScanReport;
use std::io::Write;

/// How the report is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// How much of the report is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary line only; JSON drops the entry list
    Quiet,
    /// Added entries and the summary
    #[default]
    Normal,
    /// Also the repository root and entries that were already declared
    Verbose,
}

impl Verbosity {
    /// `--quiet` takes precedence over `--verbose`
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Verbosity::Quiet,
            (true, false) => Verbosity::Verbose,
            (false, false) => Verbosity::Normal,
        }
    }
}

/// Everything a formatter needs besides the report itself
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    /// Entries are described as "would add" and the document is printed
    pub dry_run: bool,
    /// ANSI colors in text output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            verbosity: Verbosity::Normal,
            dry_run: false,
            color: true,
        }
    }
}

impl From<&CliArgs> for OutputConfig {
    fn from(args: &CliArgs) -> Self {
        Self {
            format: if args.json {
                OutputFormat::Json
            } else {
                OutputFormat::Text
            },
            verbosity: Verbosity::from_flags(args.verbose, args.quiet),
            dry_run: args.is_dry_run(),
            color: !args.no_color,
        }
    }
}

/// Writes a scan report in one particular format
pub trait OutputFormatter {
    fn format(&self, report: &ScanReport, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Pick the formatter matching `config`
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(
            config.verbosity,
            config.dry_run,
            config.color,
        )),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}
