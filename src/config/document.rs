//! The two operations the merger needs from a configuration document

use crate::domain::Update;
use crate::error::DocumentError;

/// A parsed configuration document that can be edited in place
///
/// Implementations must leave everything outside the `updates` sequence
/// untouched when appending.
pub trait ConfigDocument {
    /// Entries currently declared under `updates`, directories normalized
    fn declared_updates(&self) -> Result<Vec<Update>, DocumentError>;

    /// Append entries to the `updates` sequence, creating it if absent or empty
    fn append_updates(&mut self, updates: &[Update]) -> Result<(), DocumentError>;
}
