//! Core domain models for dependr
//!
//! This module contains the fundamental types used throughout the application:
//! - Ecosystem identifiers
//! - Update entries and their identity key
//! - The de-duplicating update set

mod ecosystem;
mod update;
mod update_set;

pub use ecosystem::Ecosystem;
pub use update::{normalize_directory, Interval, Schedule, Update, UpdateKey, ROOT_DIRECTORY};
pub use update_set::UpdateSet;
