//! dependr - dependabot configuration sync library
//!
//! This library provides the core functionality for keeping a repository's
//! dependabot configuration in step with the package ecosystems it uses:
//! - Locating the repository root and its configuration file
//! - Scanning the tree for well-known manifest files
//! - Merging missing update entries into the existing YAML without
//!   disturbing comments or layout

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod repository;
