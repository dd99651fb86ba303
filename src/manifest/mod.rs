//! Manifest detection
//!
//! This module provides functionality to:
//! - Classify a filename into a package ecosystem
//! - Walk a repository and collect the update entries it needs

mod catalog;
mod scanner;

pub use catalog::{classify, WORKFLOWS_DIR};
pub use scanner::{scan, Scanner, EXCLUDED_DIRS};
