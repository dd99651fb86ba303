//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Repository and configuration location display
//! - Per-entry added / already declared markers with colors
//! - A one-line summary, the only output in quiet mode
//! - The merged document in dry-run mode

use crate::domain::Update;
use crate::orchestrator::{Outcome, ScanReport};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether this is a dry-run
    dry_run: bool,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity, dry_run: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, dry_run: bool, color: bool) -> Self {
        Self {
            verbosity,
            dry_run,
            color,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self) -> String {
        if self.dry_run {
            if self.color {
                format!("{} ", "(dry-run)".cyan())
            } else {
                "(dry-run) ".to_string()
            }
        } else {
            String::new()
        }
    }

    /// Width of the widest ecosystem name, for column alignment
    fn ecosystem_width(&self, updates: &[Update]) -> usize {
        updates
            .iter()
            .map(|u| u.ecosystem.len())
            .max()
            .unwrap_or(0)
    }

    fn format_entry(
        &self,
        update: &Update,
        added: bool,
        width: usize,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let ecosystem = format!("{:<width$}", update.ecosystem, width = width);
        let label = if added {
            if self.dry_run {
                "would add"
            } else {
                "added"
            }
        } else {
            "already declared"
        };

        if self.color {
            let (marker, label) = if added {
                ("+".green().bold(), label.green())
            } else {
                ("=".dimmed(), label.dimmed())
            };
            writeln!(
                writer,
                "  {} {}  {}  {} ({})",
                marker,
                ecosystem.bold(),
                update.directory,
                label,
                update.interval().dimmed()
            )
        } else {
            let marker = if added { "+" } else { "=" };
            writeln!(
                writer,
                "  {} {}  {}  {} ({})",
                marker,
                ecosystem,
                update.directory,
                label,
                update.interval()
            )
        }
    }

    fn format_summary(&self, report: &ScanReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix();
        let config = report.location.config_relative_path.display();

        if report.outcome == Outcome::NothingToDo {
            let message = "No ecosystems detected, nothing to write";
            if self.color {
                return writeln!(writer, "{}{}", prefix, message.dimmed());
            }
            return writeln!(writer, "{}{}", prefix, message);
        }

        let added = report.added.len();
        let outcome = report.outcome.label();
        if self.color {
            writeln!(
                writer,
                "{}{}: {} {}, {} already declared ({})",
                prefix,
                config.to_string().bold(),
                added.to_string().green(),
                if self.dry_run { "to add" } else { "added" },
                report.already_declared,
                outcome.cyan()
            )
        } else {
            writeln!(
                writer,
                "{}{}: {} {}, {} already declared ({})",
                prefix,
                config,
                added,
                if self.dry_run { "to add" } else { "added" },
                report.already_declared,
                outcome
            )
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &ScanReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        if self.verbosity == Verbosity::Verbose {
            writeln!(writer, "Repository: {}", report.location.root.display())?;
            writeln!(
                writer,
                "Configuration: {}{}",
                report.location.config_relative_path.display(),
                if report.location.config_exists {
                    ""
                } else {
                    " (new)"
                }
            )?;
        }

        let width = self.ecosystem_width(&report.detected);
        for update in &report.detected {
            let added = report.added.iter().any(|a| a.key() == update.key());
            // Declared entries are only listed when verbose
            if added || self.verbosity == Verbosity::Verbose {
                self.format_entry(update, added, width, writer)?;
            }
        }
        if !report.detected.is_empty() {
            writeln!(writer)?;
        }

        self.format_summary(report, writer)?;

        if let Some(document) = report.document.as_deref() {
            if report.outcome == Outcome::DryRun {
                writeln!(writer)?;
                write!(writer, "{}", document)?;
            }
        }

        Ok(())
    }
}
