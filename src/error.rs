//! Application error types using thiserror
//!
//! Error hierarchy:
//! - LocateError: Issues resolving the repository and its configuration file
//! - ScanError: Failures while walking the repository tree
//! - DocumentError: Issues parsing or editing the configuration document
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Repository or configuration lookup errors
    #[error(transparent)]
    Locate(#[from] LocateError),

    /// Repository walk errors
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Configuration document errors
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Errors related to locating the repository and its configuration
#[derive(Error, Debug)]
pub enum LocateError {
    /// Input path does not exist or is neither a file nor a directory
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Repository root could not be resolved
    #[error("not inside a git repository: {path}: {message}")]
    NotARepo { path: PathBuf, message: String },

    /// No configuration at any conventional location, or a file was given
    /// that is not named like one
    #[error("no dependabot configuration found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// The configuration file lies outside the resolved repository root
    #[error("{path} is outside the repository root {root}")]
    OutsideRepository { path: PathBuf, root: PathBuf },
}

/// Errors raised while scanning the repository tree
#[derive(Error, Debug)]
pub enum ScanError {
    /// Walking a subtree failed
    #[error("error iterating {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Errors related to the dependabot configuration document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document is not valid YAML or has an unexpected shape
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// `updates` exists but is not a sequence
    #[error("`updates` in {path} is not a sequence")]
    NotASequence { path: PathBuf },

    /// The `updates` node is written in a form that cannot be edited in place
    #[error("cannot edit `updates` in {path}: {message}")]
    UnsupportedLayout { path: PathBuf, message: String },

    /// The edited document did not re-parse to the expected entries
    #[error("merged document for {path} is inconsistent: {message}")]
    SpliceFailed { path: PathBuf, message: String },

    /// New entries could not be rendered
    #[error("failed to serialize updates: {message}")]
    Serialize { message: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a directory
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to determine the working directory
    #[error("failed to get working directory: {source}")]
    CurrentDir {
        #[source]
        source: std::io::Error,
    },
}

impl LocateError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        LocateError::NotFound { path: path.into() }
    }

    /// Creates a new NotARepo error
    pub fn not_a_repo(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        LocateError::NotARepo {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new ConfigNotFound error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        LocateError::ConfigNotFound { path: path.into() }
    }
}

impl DocumentError {
    /// Creates a new Parse error
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DocumentError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new UnsupportedLayout error
    pub fn unsupported_layout(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DocumentError::UnsupportedLayout {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new SpliceFailed error
    pub fn splice_failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DocumentError::SpliceFailed {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl IoError {
    /// Creates a new Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new Write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::Write {
            path: path.into(),
            source,
        }
    }

    /// Creates a new CreateDir error
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IoError::CreateDir {
            path: path.into(),
            source,
        }
    }
}
