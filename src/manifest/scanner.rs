//! Repository walk that turns well-known manifest files into update entries

use crate::domain::{Ecosystem, Interval, Update, UpdateSet, ROOT_DIRECTORY};
use crate::error::ScanError;
use crate::manifest::catalog::{classify, WORKFLOWS_DIR};
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names that are never descended into
///
/// Version control metadata and vendored dependency caches contain manifests
/// that do not belong to the repository itself.
pub const EXCLUDED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "bower_components",
    "vendor",
    ".terraform",
];

/// Scanner for ecosystem manifests below a repository root
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    interval: Interval,
}

impl Scanner {
    /// Create a scanner for the given root with the default weekly schedule
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            interval: Interval::default(),
        }
    }

    /// Use a different schedule for generated entries
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    /// Walk the tree and collect one entry per (ecosystem, directory)
    pub fn scan(&self) -> Result<UpdateSet, ScanError> {
        let mut updates = UpdateSet::new();
        let root = self.root.as_path();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry, root));

        for entry in walker {
            let entry = entry.map_err(|source| ScanError::Walk {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf()),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(ecosystem) = classify(name) else {
                continue;
            };

            let directory = relative_directory(root, entry.path());
            tracing::debug!(
                "{} -> {} in {}",
                entry.path().display(),
                ecosystem,
                directory
            );
            updates.add(self.entry(ecosystem, &directory));
        }

        if root.join(WORKFLOWS_DIR).is_dir() {
            tracing::debug!("found {}, adding github-actions", WORKFLOWS_DIR);
            updates.add(self.entry(Ecosystem::GithubActions, ROOT_DIRECTORY));
        }

        tracing::info!(
            "found {} update entries under {}",
            updates.len(),
            root.display()
        );
        Ok(updates)
    }

    fn entry(&self, ecosystem: Ecosystem, directory: &str) -> Update {
        Update::new(ecosystem.as_str(), directory, self.interval.as_str())
    }
}

/// Scan `root` with the default weekly schedule
pub fn scan(root: &Path) -> Result<UpdateSet, ScanError> {
    Scanner::new(root).scan()
}

/// True when any component below the root is an excluded directory name
fn is_excluded(entry: &DirEntry, root: &Path) -> bool {
    let Ok(relative) = entry.path().strip_prefix(root) else {
        return false;
    };

    let excluded = relative.components().any(|component| match component {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| EXCLUDED_DIRS.contains(&name)),
        _ => false,
    });

    if excluded && entry.file_type().is_dir() {
        tracing::debug!("skipping {}", entry.path().display());
    }
    excluded
}

/// Directory of `file` relative to `root`, in canonical `/`-rooted form
fn relative_directory(root: &Path, file: &Path) -> String {
    let parent = file.parent().unwrap_or(root);
    let relative = parent.strip_prefix(root).unwrap_or(Path::new(""));

    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if segments.is_empty() {
        ROOT_DIRECTORY.to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}
