//! The `RecordStore` trait — the seam between statement producers and a
//! storage backend.
//!
//! The trait is implemented by storage backends (e.g.
//! `gradebook-store-json`). The service layer depends on this abstraction,
//! not on any concrete backend.

use crate::statement::{Statement, StatementOutcome};

/// Abstraction over a gradebook storage backend.
///
/// A backend interprets the fixed statement vocabulary against its named
/// collections, running each statement's full load → transform → save
/// cycle to completion before returning. Business-level misses (no record
/// matched, unknown collection name) are empty results, never errors;
/// implementations reserve their error type for storage faults.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Execute one statement to completion.
  fn execute(&self, statement: Statement) -> Result<StatementOutcome, Self::Error>;
}
