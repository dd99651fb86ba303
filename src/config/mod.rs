//! Dependabot configuration document handling
//!
//! This module provides:
//! - The document abstraction the merger works against
//! - A comment preserving YAML implementation of it
//! - The merge of scanned entries into a document
//! - Writing the result back to disk

mod document;
mod merger;
mod template;
mod writer;
mod yaml;

pub use document::ConfigDocument;
pub use merger::{merge, Merged};
pub use template::NEW_CONFIG_TEMPLATE;
pub use writer::{read_config, ConfigWriter};
pub use yaml::YamlDocument;
