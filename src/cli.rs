//! CLI argument parsing module for dependr

use crate::domain::Interval;
use crate::orchestrator::RunOptions;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Parse a schedule interval: daily, weekly or monthly
fn parse_interval(s: &str) -> Result<Interval, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "daily" => Ok(Interval::Daily),
        "weekly" => Ok(Interval::Weekly),
        "monthly" => Ok(Interval::Monthly),
        other => Err(format!(
            "invalid interval: {} (expected daily, weekly or monthly)",
            other
        )),
    }
}

/// Keeps dependabot.yml in sync with the ecosystems found in a repository
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dependr",
    version,
    about = "Detects package ecosystems in a repository and keeps dependabot.yml in sync"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

/// Subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Scan a repository and add missing update entries to its dependabot config
    Scan {
        /// Repository directory or dependabot config file (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        options: SyncArgs,
    },

    /// Same as scan, with the target given by flag
    Sniff {
        /// Repository directory or dependabot config file
        #[arg(short, long)]
        path: PathBuf,

        #[command(flatten)]
        options: SyncArgs,
    },
}

/// Options shared by scan and sniff
#[derive(Args, Debug, Clone)]
pub struct SyncArgs {
    /// Create .github/dependabot.yml when no config exists
    #[arg(short, long)]
    pub create_if_missing: bool,

    /// Dry run mode - print the merged config without writing it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Schedule for generated entries (daily, weekly, monthly)
    #[arg(long, value_parser = parse_interval, default_value = "weekly")]
    pub interval: Interval,
}

impl CliArgs {
    /// Target path of the selected subcommand
    pub fn path(&self) -> &Path {
        match &self.command {
            Command::Scan { path, .. } | Command::Sniff { path, .. } => path,
        }
    }

    /// Options of the selected subcommand
    pub fn sync_args(&self) -> &SyncArgs {
        match &self.command {
            Command::Scan { options, .. } | Command::Sniff { options, .. } => options,
        }
    }

    /// Check if the run is a dry-run
    pub fn is_dry_run(&self) -> bool {
        self.sync_args().dry_run
    }

    /// Build orchestrator options
    ///
    /// The spinner is hidden whenever stdout is meant to be quiet or parsed.
    pub fn run_options(&self) -> RunOptions {
        let sync = self.sync_args();
        RunOptions {
            path: self.path().to_path_buf(),
            create_if_missing: sync.create_if_missing,
            dry_run: sync.dry_run,
            interval: sync.interval,
            show_progress: !self.quiet && !self.json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_scan_default_args() {
        let args = CliArgs::parse_from(["dependr", "scan"]);
        assert_eq!(args.path(), Path::new("."));
        assert!(!args.sync_args().create_if_missing);
        assert!(!args.is_dry_run());
        assert_eq!(args.sync_args().interval, Interval::Weekly);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(!args.json);
        assert!(!args.no_color);
    }

    #[test]
    fn test_scan_path_argument() {
        let args = CliArgs::parse_from(["dependr", "scan", "/some/path"]);
        assert_eq!(args.path(), Path::new("/some/path"));
    }

    #[test]
    fn test_create_if_missing_flags() {
        let args = CliArgs::parse_from(["dependr", "scan", "-c"]);
        assert!(args.sync_args().create_if_missing);

        let args = CliArgs::parse_from(["dependr", "scan", "--create-if-missing"]);
        assert!(args.sync_args().create_if_missing);
    }

    #[test]
    fn test_sniff_requires_path() {
        assert!(CliArgs::try_parse_from(["dependr", "sniff"]).is_err());

        let args = CliArgs::parse_from(["dependr", "sniff", "-p", "repo", "-c"]);
        assert!(matches!(args.command, Command::Sniff { .. }));
        assert_eq!(args.path(), Path::new("repo"));
        assert!(args.sync_args().create_if_missing);

        let args = CliArgs::parse_from(["dependr", "sniff", "--path", "repo"]);
        assert_eq!(args.path(), Path::new("repo"));
    }

    #[test]
    fn test_dry_run_flags() {
        let args = CliArgs::parse_from(["dependr", "scan", "-n"]);
        assert!(args.is_dry_run());

        let args = CliArgs::parse_from(["dependr", "sniff", "-p", ".", "--dry-run"]);
        assert!(args.is_dry_run());
    }

    #[test]
    fn test_interval() {
        let args = CliArgs::parse_from(["dependr", "scan", "--interval", "daily"]);
        assert_eq!(args.sync_args().interval, Interval::Daily);

        let args = CliArgs::parse_from(["dependr", "scan", "--interval", "Monthly"]);
        assert_eq!(args.sync_args().interval, Interval::Monthly);
    }

    #[test]
    fn test_invalid_interval() {
        let result = CliArgs::try_parse_from(["dependr", "scan", "--interval", "hourly"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["dependr", "scan", "--verbose", "--json", "--no-color"]);
        assert!(args.verbose);
        assert!(args.json);
        assert!(args.no_color);

        let args = CliArgs::parse_from(["dependr", "-q", "scan"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_subcommand_required() {
        assert!(CliArgs::try_parse_from(["dependr"]).is_err());
    }

    #[test]
    fn test_run_options() {
        let args = CliArgs::parse_from(["dependr", "scan", "repo", "-c", "-n"]);
        let options = args.run_options();
        assert_eq!(options.path, PathBuf::from("repo"));
        assert!(options.create_if_missing);
        assert!(options.dry_run);
        assert!(options.show_progress);

        let args = CliArgs::parse_from(["dependr", "--json", "scan"]);
        assert!(!args.run_options().show_progress);
    }

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("weekly"), Ok(Interval::Weekly));
        assert_eq!(parse_interval(" DAILY "), Ok(Interval::Daily));
        assert!(parse_interval("").is_err());
    }
}
