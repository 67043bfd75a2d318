//! Storage for reconciliation output.
//!
//! A run produces one CSV file of pending practices, written only when
//! something is pending.

pub mod pending;

use std::path::PathBuf;

// Re-export for convenience
pub use pending::PendingStorage;

/// Metadata about a storage write operation.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Number of data rows written
    pub record_count: usize,
    /// File that was written
    pub location: PathBuf,
}
