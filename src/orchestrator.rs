//! Scan orchestrator coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: locate → scan → load → merge → write
//! - Dry-run mode support
//! - A serializable report of what happened

use crate::config::{merge, read_config, ConfigWriter, YamlDocument};
use crate::domain::{Interval, Update};
use crate::error::AppError;
use crate::manifest::Scanner;
use crate::progress::Progress;
use crate::repository::{locate, GitCli, RepoRootResolver, RepositoryLocation};
use serde::Serialize;
use std::path::PathBuf;

/// Options for a single run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// File or directory the user pointed at
    pub path: PathBuf,
    /// Create the configuration at the default location when none exists
    pub create_if_missing: bool,
    /// Compute the result without writing anything
    pub dry_run: bool,
    /// Schedule for generated entries
    pub interval: Interval,
    /// Show a spinner while scanning
    pub show_progress: bool,
}

impl RunOptions {
    /// Options for `path` with every flag off and the weekly schedule
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
            dry_run: false,
            interval: Interval::default(),
            show_progress: false,
        }
    }
}

/// What the run did to the configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A new configuration file was written
    Created,
    /// New entries were appended to an existing file
    Updated,
    /// Every detected entry was already declared
    Unchanged,
    /// No configuration exists and nothing was detected
    NothingToDo,
    /// A write would have happened but dry-run was requested
    DryRun,
}

impl Outcome {
    /// Short human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Created => "created",
            Outcome::Updated => "updated",
            Outcome::Unchanged => "unchanged",
            Outcome::NothingToDo => "nothing to do",
            Outcome::DryRun => "dry-run",
        }
    }
}

/// Result of running the orchestrator
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Repository root and configuration location
    pub location: RepositoryLocation,
    /// Every entry the scan produced, sorted by key
    pub detected: Vec<Update>,
    /// Entries appended to the document
    pub added: Vec<Update>,
    /// Detected entries the document already declared
    pub already_declared: usize,
    /// What happened to the file
    pub outcome: Outcome,
    /// Merged document text, kept for dry-run output
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

/// Orchestrator for the scan workflow
pub struct Orchestrator<R = GitCli> {
    options: RunOptions,
    resolver: R,
}

impl Orchestrator<GitCli> {
    /// Create an orchestrator that asks git for the repository root
    pub fn new(options: RunOptions) -> Self {
        Self::with_resolver(options, GitCli::new())
    }
}

impl<R: RepoRootResolver> Orchestrator<R> {
    /// Create an orchestrator with a custom repository root resolver
    pub fn with_resolver(options: RunOptions, resolver: R) -> Self {
        Self { options, resolver }
    }

    /// Run the complete workflow
    ///
    /// The merged document is built fully in memory before anything is
    /// written, so a failure at any step leaves the file untouched.
    pub fn run(&self) -> Result<ScanReport, AppError> {
        let location = locate(
            &self.options.path,
            self.options.create_if_missing,
            &self.resolver,
        )?;
        let config_path = location.config_path();
        tracing::info!(
            "configuration: {} (exists: {})",
            config_path.display(),
            location.config_exists
        );

        let mut progress = Progress::new(self.options.show_progress);
        progress.spinner(&format!("Scanning {}", location.root.display()));
        let scanned = Scanner::new(&location.root)
            .with_interval(self.options.interval)
            .scan();
        progress.finish_and_clear();
        let candidates = scanned?;
        let detected = candidates.to_ordered_list();

        if !location.config_exists && candidates.is_empty() {
            tracing::info!("no ecosystems detected, not creating {}", config_path.display());
            return Ok(ScanReport {
                location,
                detected,
                added: Vec::new(),
                already_declared: 0,
                outcome: Outcome::NothingToDo,
                document: None,
            });
        }

        let document = if location.config_exists {
            let source = read_config(&config_path)?;
            YamlDocument::parse(&config_path, source)?
        } else {
            YamlDocument::template(&config_path)
        };

        let merged = merge(document, candidates)?;
        let has_changes = merged.has_changes();
        let content = merged.document.into_string();

        let outcome = if !has_changes {
            Outcome::Unchanged
        } else if !ConfigWriter::new(self.options.dry_run).write(&config_path, &content)? {
            Outcome::DryRun
        } else if location.config_exists {
            Outcome::Updated
        } else {
            Outcome::Created
        };

        Ok(ScanReport {
            location,
            detected,
            added: merged.added,
            already_declared: merged.already_declared,
            outcome,
            document: self.options.dry_run.then_some(content),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ecosystem;
    use crate::error::LocateError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct FixedRoot(PathBuf);

    impl RepoRootResolver for FixedRoot {
        fn resolve_root(&self, _start: &Path) -> Result<PathBuf, LocateError> {
            Ok(self.0.clone())
        }
    }

    fn run(dir: &TempDir, options: RunOptions) -> Result<ScanReport, AppError> {
        Orchestrator::with_resolver(options, FixedRoot(dir.path().to_path_buf())).run()
    }

    fn create_options(dir: &TempDir) -> RunOptions {
        RunOptions {
            create_if_missing: true,
            ..RunOptions::new(dir.path())
        }
    }

    #[test]
    fn test_run_options_new() {
        let options = RunOptions::new(".");
        assert_eq!(options.path, PathBuf::from("."));
        assert!(!options.create_if_missing);
        assert!(!options.dry_run);
        assert_eq!(options.interval, Interval::Weekly);
        assert!(!options.show_progress);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(Outcome::Created.label(), "created");
        assert_eq!(Outcome::NothingToDo.label(), "nothing to do");
        assert_eq!(
            serde_json::to_string(&Outcome::NothingToDo).unwrap(),
            "\"nothing_to_do\""
        );
    }

    #[test]
    fn test_empty_repository_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let report = run(&dir, create_options(&dir)).unwrap();

        assert_eq!(report.outcome, Outcome::NothingToDo);
        assert!(report.detected.is_empty());
        assert!(!dir.path().join(".github").exists());
    }

    #[test]
    fn test_creates_configuration() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let report = run(&dir, create_options(&dir)).unwrap();
        assert_eq!(report.outcome, Outcome::Created);
        assert_eq!(report.added, vec![Update::weekly(Ecosystem::Npm, "/")]);
        assert!(report.document.is_none());

        let written = fs::read_to_string(dir.path().join(".github/dependabot.yml")).unwrap();
        assert!(written.starts_with("# To get started with Dependabot"));
        assert!(written.contains("package-ecosystem: npm"));
    }

    #[test]
    fn test_missing_configuration_without_create_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let err = run(&dir, RunOptions::new(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            AppError::Locate(LocateError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_existing_entries_are_unchanged() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("go.mod"), "module x\n").unwrap();
        let original = "version: 2\nupdates:\n  - package-ecosystem: gomod\n    directory: /\n    schedule:\n      interval: daily\n";
        fs::write(dir.path().join("dependabot.yml"), original).unwrap();

        let report = run(&dir, RunOptions::new(dir.path())).unwrap();
        assert_eq!(report.outcome, Outcome::Unchanged);
        assert_eq!(report.already_declared, 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("dependabot.yml")).unwrap(),
            original
        );
    }

    #[test]
    fn test_updates_existing_configuration() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "[package]\n").unwrap();
        fs::write(dir.path().join("dependabot.yaml"), "version: 2\nupdates: []\n").unwrap();

        let report = run(&dir, RunOptions::new(dir.path())).unwrap();
        assert_eq!(report.outcome, Outcome::Updated);
        assert_eq!(
            report.location.config_relative_path,
            PathBuf::from("dependabot.yaml")
        );

        let written = fs::read_to_string(dir.path().join("dependabot.yaml")).unwrap();
        assert!(written.contains("package-ecosystem: cargo"));
    }

    #[test]
    fn test_dry_run_keeps_document_in_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("requirements.txt"), "").unwrap();

        let options = RunOptions {
            dry_run: true,
            ..create_options(&dir)
        };
        let report = run(&dir, options).unwrap();

        assert_eq!(report.outcome, Outcome::DryRun);
        let document = report.document.unwrap();
        assert!(document.contains("package-ecosystem: pip"));
        assert!(!dir.path().join(".github/dependabot.yml").exists());
    }

    #[test]
    fn test_interval_is_applied() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Dockerfile"), "FROM scratch\n").unwrap();

        let options = RunOptions {
            interval: Interval::Monthly,
            ..create_options(&dir)
        };
        let report = run(&dir, options).unwrap();
        assert_eq!(report.added[0].interval(), "monthly");
    }

    #[test]
    fn test_malformed_configuration_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        let broken = "version: 2\nupdates: [\n";
        fs::write(dir.path().join("dependabot.yml"), broken).unwrap();

        let err = run(&dir, RunOptions::new(dir.path())).unwrap_err();
        assert!(matches!(err, AppError::Document(_)));
        assert_eq!(
            fs::read_to_string(dir.path().join("dependabot.yml")).unwrap(),
            broken
        );
    }
}
