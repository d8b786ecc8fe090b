//! Error types for `gradebook-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("model did not serialize to a JSON object")]
  NotARecord,

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
