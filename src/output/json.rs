//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of scan reports
//! - Entry-by-entry added / already declared information

use crate::orchestrator::{Outcome, ScanReport};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Absolute repository root
    root: String,
    /// Configuration path relative to the root
    config: String,
    /// Whether the configuration existed before the run
    config_existed: bool,
    /// What happened to the file
    outcome: Outcome,
    /// Summary counts
    summary: JsonSummary,
    /// Detected entries (omitted in quiet mode)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    entries: Vec<JsonEntry<'a>>,
    /// Merged document for dry-runs
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
}

/// JSON representation of summary counts
#[derive(Serialize)]
struct JsonSummary {
    detected: usize,
    added: usize,
    already_declared: usize,
}

/// JSON representation of a single detected entry
#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(rename = "package-ecosystem")]
    ecosystem: &'a str,
    directory: &'a str,
    interval: &'a str,
    added: bool,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ScanReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let entries = if self.verbosity == Verbosity::Quiet {
            Vec::new()
        } else {
            report
                .detected
                .iter()
                .map(|update| JsonEntry {
                    ecosystem: &update.ecosystem,
                    directory: &update.directory,
                    interval: update.interval(),
                    added: report.added.iter().any(|a| a.key() == update.key()),
                })
                .collect()
        };

        let output = JsonOutput {
            root: report.location.root.display().to_string(),
            config: report.location.config_relative_path.display().to_string(),
            config_existed: report.location.config_exists,
            outcome: report.outcome,
            summary: JsonSummary {
                detected: report.detected.len(),
                added: report.added.len(),
                already_declared: report.already_declared,
            },
            entries,
            document: report.document.as_deref(),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Ecosystem, Update};
    use crate::repository::RepositoryLocation;
    use std::path::PathBuf;

    fn create_report() -> ScanReport {
        ScanReport {
            location: RepositoryLocation {
                root: PathBuf::from("/repo"),
                config_relative_path: PathBuf::from(".github/dependabot.yml"),
                config_exists: false,
            },
            detected: vec![
                Update::weekly(Ecosystem::GithubActions, "/"),
                Update::weekly(Ecosystem::Npm, "/web"),
            ],
            added: vec![
                Update::weekly(Ecosystem::GithubActions, "/"),
                Update::weekly(Ecosystem::Npm, "/web"),
            ],
            already_declared: 0,
            outcome: Outcome::Created,
            document: None,
        }
    }

    fn render(verbosity: Verbosity, report: &ScanReport) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new(verbosity)
            .format(report, &mut output)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_output() {
        let json = render(Verbosity::Normal, &create_report());

        assert_eq!(json["root"], "/repo");
        assert_eq!(json["config"], ".github/dependabot.yml");
        assert_eq!(json["config_existed"], false);
        assert_eq!(json["outcome"], "created");
        assert_eq!(json["summary"]["detected"], 2);
        assert_eq!(json["summary"]["added"], 2);
        assert_eq!(json["entries"][1]["package-ecosystem"], "npm");
        assert_eq!(json["entries"][1]["directory"], "/web");
        assert_eq!(json["entries"][1]["interval"], "weekly");
        assert_eq!(json["entries"][1]["added"], true);
        assert!(json.get("document").is_none());
    }

    #[test]
    fn test_json_quiet_omits_entries() {
        let json = render(Verbosity::Quiet, &create_report());
        assert!(json.get("entries").is_none());
        assert_eq!(json["summary"]["added"], 2);
    }

    #[test]
    fn test_json_dry_run_includes_document() {
        let mut report = create_report();
        report.outcome = Outcome::DryRun;
        report.document = Some("version: 2\n".to_string());

        let json = render(Verbosity::Normal, &report);
        assert_eq!(json["outcome"], "dry_run");
        assert_eq!(json["document"], "version: 2\n");
    }
}
