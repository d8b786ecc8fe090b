//! Service and API error types.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error surfaced by a service operation or an API handler.
///
/// `Rejected` and `NotFound` carry the human-readable message shown to
/// the caller; only `Store` represents an actual fault.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Input failed validation — missing fields, out-of-range values,
  /// duplicate business keys. Maps to 400.
  #[error("{0}")]
  Rejected(String),

  /// The referenced record does not exist. Maps to 404.
  #[error("{0}")]
  NotFound(String),

  /// Credentials did not verify. Maps to 401.
  #[error("invalid username or password")]
  Unauthorized,

  /// A storage fault. Maps to 500.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a backend error.
  pub fn store<E>(err: E) -> ApiError
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(err))
  }
}

impl From<gradebook_core::Error> for ApiError {
  fn from(err: gradebook_core::Error) -> ApiError {
    ApiError::store(err)
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Rejected(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "success": false, "message": message }))).into_response()
  }
}
