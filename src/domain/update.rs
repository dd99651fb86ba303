//! Update entry types shared by the scanner and the configuration merger

use super::Ecosystem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Directory token used for the repository root
pub const ROOT_DIRECTORY: &str = "/";

/// Cadence at which Dependabot checks an ecosystem for updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Check every weekday
    Daily,
    /// Check once a week
    #[default]
    Weekly,
    /// Check once a month
    Monthly,
}

impl Interval {
    /// Returns the `schedule.interval` value
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `schedule` block of an update entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub interval: String,
}

/// One `updates` entry of a dependabot configuration
///
/// Two entries are the same rule when their [`UpdateKey`] matches; the
/// schedule does not take part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Value of `package-ecosystem`
    #[serde(rename = "package-ecosystem")]
    pub ecosystem: String,
    /// Manifest directory relative to the repository root, `/` for the root
    pub directory: String,
    /// Check cadence
    pub schedule: Schedule,
}

/// Identity of an update entry: `(ecosystem, directory)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UpdateKey {
    pub ecosystem: String,
    pub directory: String,
}

impl Update {
    /// Creates an entry, normalizing the directory to the canonical form
    pub fn new(
        ecosystem: impl Into<String>,
        directory: impl AsRef<str>,
        interval: impl Into<String>,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            directory: normalize_directory(directory.as_ref()),
            schedule: Schedule {
                interval: interval.into(),
            },
        }
    }

    /// Creates an entry with the default weekly schedule
    pub fn weekly(ecosystem: Ecosystem, directory: impl AsRef<str>) -> Self {
        Self::new(ecosystem.as_str(), directory, Interval::Weekly.as_str())
    }

    /// Returns the identity key of this entry
    pub fn key(&self) -> UpdateKey {
        UpdateKey {
            ecosystem: self.ecosystem.clone(),
            directory: normalize_directory(&self.directory),
        }
    }

    /// Returns the schedule interval
    pub fn interval(&self) -> &str {
        &self.schedule.interval
    }
}

impl fmt::Display for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ecosystem, self.directory)
    }
}

/// Normalizes a directory to the canonical `/`-rooted form
///
/// `""`, `"."`, `"./"` and `"/"` all become `/`; `"./a/b/"`, `"a/b"` and
/// `"/a/b"` all become `/a/b`. Backslashes are treated as separators.
pub fn normalize_directory(directory: &str) -> String {
    let segments: Vec<&str> = directory
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    if segments.is_empty() {
        ROOT_DIRECTORY.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_root_variants() {
        for root in ["", ".", "./", "/", "//", "/./"] {
            assert_eq!(normalize_directory(root), "/", "input: {:?}", root);
        }
    }

    #[test]
    fn test_normalize_nested_variants() {
        for dir in ["services/api", "./services/api", "/services/api", "/services/api/"] {
            assert_eq!(normalize_directory(dir), "/services/api", "input: {:?}", dir);
        }
        assert_eq!(normalize_directory("services\\api"), "/services/api");
    }

    #[test]
    fn test_weekly_default() {
        let update = Update::weekly(Ecosystem::Npm, ".");
        assert_eq!(update.ecosystem, "npm");
        assert_eq!(update.directory, "/");
        assert_eq!(update.interval(), "weekly");
    }

    #[test]
    fn test_key_ignores_schedule() {
        let weekly = Update::new("cargo", "/", "weekly");
        let daily = Update::new("cargo", "./", "daily");
        assert_eq!(weekly.key(), daily.key());
        assert_ne!(weekly, daily);
    }

    #[test]
    fn test_key_distinguishes_directory() {
        let root = Update::new("pip", "/", "weekly");
        let nested = Update::new("pip", "/services/api", "weekly");
        assert_ne!(root.key(), nested.key());
    }

    #[test]
    fn test_interval_default_and_labels() {
        assert_eq!(Interval::default(), Interval::Weekly);
        assert_eq!(Interval::Daily.as_str(), "daily");
        assert_eq!(Interval::Monthly.to_string(), "monthly");
    }

    #[test]
    fn test_serialized_field_names() {
        let update = Update::weekly(Ecosystem::Gomod, "/");
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["package-ecosystem"], "gomod");
        assert_eq!(json["directory"], "/");
        assert_eq!(json["schedule"]["interval"], "weekly");
    }
}
