//! Error type for `gradebook-store-json`.
//!
//! Only storage faults live here. Business-level misses — no record
//! matched, unknown collection name — come back as empty results from
//! [`JsonStore`](crate::JsonStore), not as errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error at {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("serializing collection {collection}: {source}")]
  Serialize {
    collection: String,
    #[source]
    source:     serde_json::Error,
  },

  /// A writer panicked while holding a collection lock.
  #[error("collection lock poisoned: {0}")]
  Poisoned(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
