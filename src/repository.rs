//! Repository root resolution and dependabot configuration lookup
//!
//! This module provides:
//! - Resolution of the repository root through git
//! - Lookup of the configuration file at its conventional locations

use crate::error::{AppError, IoError, LocateError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Conventional configuration locations, in lookup priority order
pub const CONFIG_LOCATIONS: &[&str] = &[
    "dependabot.yml",
    "dependabot.yaml",
    ".github/dependabot.yml",
    ".github/dependabot.yaml",
];

/// Location used when a configuration has to be created
pub const DEFAULT_CONFIG_LOCATION: &str = ".github/dependabot.yml";

/// Filenames accepted when a configuration file is given directly
const CONFIG_FILENAMES: &[&str] = &["dependabot.yml", "dependabot.yaml"];

/// Trait for resolving the root of the repository containing a directory
pub trait RepoRootResolver {
    /// Return the absolute repository root for `start`
    fn resolve_root(&self, start: &Path) -> Result<PathBuf, LocateError>;
}

/// Resolver that asks `git rev-parse --show-toplevel`
#[derive(Debug, Default)]
pub struct GitCli;

impl GitCli {
    /// Create a new git resolver
    pub fn new() -> Self {
        Self
    }
}

impl RepoRootResolver for GitCli {
    fn resolve_root(&self, start: &Path) -> Result<PathBuf, LocateError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(start)
            .args(["rev-parse", "--show-toplevel"])
            .output()
            .map_err(|e| {
                LocateError::not_a_repo(start, format!("failed to execute git: {}", e))
            })?;

        if !output.status.success() {
            return Err(LocateError::not_a_repo(
                start,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if root.is_empty() {
            return Err(LocateError::not_a_repo(
                start,
                "git rev-parse --show-toplevel returned an empty path",
            ));
        }

        Ok(PathBuf::from(root))
    }
}

/// Where the repository lives and where its configuration is (or will be)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryLocation {
    /// Absolute repository root
    pub root: PathBuf,
    /// Configuration path relative to the root
    pub config_relative_path: PathBuf,
    /// Whether the configuration file already exists
    pub config_exists: bool,
}

impl RepositoryLocation {
    /// Absolute path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.root.join(&self.config_relative_path)
    }
}

/// Resolve the repository and configuration location for a user supplied path
///
/// A file path must name a dependabot configuration. A directory path is
/// searched at the conventional locations under the repository root; when
/// nothing is found and `create_if_missing` is set the default location is
/// returned with `config_exists == false`.
pub fn locate<R: RepoRootResolver + ?Sized>(
    user_path: &Path,
    create_if_missing: bool,
    resolver: &R,
) -> Result<RepositoryLocation, AppError> {
    let path = absolute(user_path)?;

    let metadata = std::fs::metadata(&path).map_err(|_| LocateError::not_found(&path))?;

    if metadata.is_file() {
        let parent = path.parent().unwrap_or(Path::new("/"));
        let root = resolver.resolve_root(parent)?;
        tracing::info!("repository root: {}", root.display());

        let is_config_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| CONFIG_FILENAMES.contains(&n));
        if !is_config_name {
            return Err(LocateError::config_not_found(path).into());
        }

        let config_relative_path = relative_to(&root, &path)?;
        return Ok(RepositoryLocation {
            root,
            config_relative_path,
            config_exists: true,
        });
    }

    if !metadata.is_dir() {
        return Err(LocateError::not_found(&path).into());
    }

    let root = resolver.resolve_root(&path)?;
    tracing::info!("repository root: {}", root.display());

    if let Some(found) = CONFIG_LOCATIONS
        .iter()
        .find(|location| root.join(location).is_file())
    {
        tracing::info!("using configuration {}", found);
        return Ok(RepositoryLocation {
            root,
            config_relative_path: PathBuf::from(found),
            config_exists: true,
        });
    }

    if !create_if_missing {
        return Err(LocateError::config_not_found(&root).into());
    }

    tracing::info!(
        "no configuration found, defaulting to {}",
        DEFAULT_CONFIG_LOCATION
    );
    Ok(RepositoryLocation {
        root,
        config_relative_path: PathBuf::from(DEFAULT_CONFIG_LOCATION),
        config_exists: false,
    })
}

/// Make `path` absolute against the current working directory
fn absolute(path: &Path) -> Result<PathBuf, AppError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|source| IoError::CurrentDir { source })?;
    Ok(cwd.join(path))
}

/// Path of `path` relative to `root`, resolving symlinks if a plain prefix
/// match fails (e.g. `/tmp` vs `/private/tmp`)
fn relative_to(root: &Path, path: &Path) -> Result<PathBuf, LocateError> {
    if let Ok(relative) = path.strip_prefix(root) {
        return Ok(relative.to_path_buf());
    }

    let outside = || LocateError::OutsideRepository {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };
    let canonical_root = root.canonicalize().map_err(|_| outside())?;
    let canonical_path = path.canonicalize().map_err(|_| outside())?;
    canonical_path
        .strip_prefix(&canonical_root)
        .map(Path::to_path_buf)
        .map_err(|_| outside())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Resolver that always returns the same root and records its input
    struct FixedRoot {
        root: PathBuf,
        calls: Mutex<Vec<PathBuf>>,
    }

    impl FixedRoot {
        fn new(root: &Path) -> Self {
            Self {
                root: root.to_path_buf(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl RepoRootResolver for FixedRoot {
        fn resolve_root(&self, start: &Path) -> Result<PathBuf, LocateError> {
            self.calls.lock().unwrap().push(start.to_path_buf());
            Ok(self.root.clone())
        }
    }

    /// Resolver that always fails
    struct NoRepo;

    impl RepoRootResolver for NoRepo {
        fn resolve_root(&self, start: &Path) -> Result<PathBuf, LocateError> {
            Err(LocateError::not_a_repo(start, "booyah!"))
        }
    }

    #[test]
    fn test_locate_config_file_given_directly() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("dependabot.yml");
        fs::write(&file, "version: 2\n").unwrap();

        let location = locate(&file, false, &FixedRoot::new(dir.path())).unwrap();
        assert!(location.config_exists);
        assert_eq!(location.config_relative_path, PathBuf::from("dependabot.yml"));
        assert_eq!(location.root, dir.path());
        assert_eq!(location.config_path(), file);
    }

    #[test]
    fn test_locate_file_resolves_root_from_parent() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".github")).unwrap();
        let file = dir.path().join(".github/dependabot.yaml");
        fs::write(&file, "version: 2\n").unwrap();

        let resolver = FixedRoot::new(dir.path());
        let location = locate(&file, false, &resolver).unwrap();
        assert_eq!(
            location.config_relative_path,
            PathBuf::from(".github/dependabot.yaml")
        );
        assert_eq!(
            resolver.calls.lock().unwrap().as_slice(),
            &[dir.path().join(".github")]
        );
    }

    #[test]
    fn test_locate_rejects_unrelated_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.yml");
        fs::write(&file, "").unwrap();

        let err = locate(&file, true, &FixedRoot::new(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            AppError::Locate(LocateError::ConfigNotFound { ref path }) if *path == file
        ));
    }

    #[test]
    fn test_locate_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = locate(&missing, true, &FixedRoot::new(dir.path())).unwrap_err();
        assert!(matches!(err, AppError::Locate(LocateError::NotFound { .. })));
    }

    #[test]
    fn test_locate_directory_finds_github_config() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".github")).unwrap();
        fs::write(dir.path().join(".github/dependabot.yml"), "version: 2\n").unwrap();

        let location = locate(dir.path(), false, &FixedRoot::new(dir.path())).unwrap();
        assert!(location.config_exists);
        assert_eq!(
            location.config_relative_path,
            PathBuf::from(".github/dependabot.yml")
        );
    }

    #[test]
    fn test_locate_directory_respects_priority() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".github")).unwrap();
        fs::write(dir.path().join(".github/dependabot.yml"), "").unwrap();
        fs::write(dir.path().join("dependabot.yaml"), "").unwrap();

        let location = locate(dir.path(), false, &FixedRoot::new(dir.path())).unwrap();
        assert_eq!(location.config_relative_path, PathBuf::from("dependabot.yaml"));
    }

    #[test]
    fn test_locate_directory_searches_from_root() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("dependabot.yml"), "").unwrap();

        let location =
            locate(&dir.path().join("sub"), false, &FixedRoot::new(dir.path())).unwrap();
        assert_eq!(location.root, dir.path());
        assert_eq!(location.config_relative_path, PathBuf::from("dependabot.yml"));
    }

    #[test]
    fn test_locate_directory_without_config() {
        let dir = TempDir::new().unwrap();

        let err = locate(dir.path(), false, &FixedRoot::new(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            AppError::Locate(LocateError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_locate_directory_create_if_missing() {
        let dir = TempDir::new().unwrap();

        let location = locate(dir.path(), true, &FixedRoot::new(dir.path())).unwrap();
        assert!(!location.config_exists);
        assert_eq!(
            location.config_relative_path,
            PathBuf::from(DEFAULT_CONFIG_LOCATION)
        );
        assert_eq!(location.root, dir.path());
    }

    #[test]
    fn test_locate_not_a_repo() {
        let dir = TempDir::new().unwrap();

        let err = locate(dir.path(), true, &NoRepo).unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, AppError::Locate(LocateError::NotARepo { .. })));
        assert!(msg.contains("booyah!"));
    }

    #[test]
    fn test_git_cli_outside_repository() {
        let dir = TempDir::new().unwrap();
        // Only meaningful where git is installed and the temp dir is not inside a repo
        if GitCli::new().resolve_root(dir.path()).is_ok() {
            return;
        }
        let err = GitCli::new().resolve_root(dir.path()).unwrap_err();
        assert!(matches!(err, LocateError::NotARepo { .. }));
    }
}
