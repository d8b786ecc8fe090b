//! The `{success, message, data}` JSON envelope every endpoint returns.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Body shape shared by all endpoints. `message` and `data` are omitted
/// when empty rather than sent as null.
#[derive(Debug, Serialize)]
pub struct Reply {
  pub success: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<Value>,
}

impl Reply {
  /// Success carrying only data.
  pub fn data<T: Serialize>(data: T) -> Result<Reply, ApiError> {
    Ok(Reply {
      success: true,
      message: None,
      data:    Some(serde_json::to_value(data).map_err(ApiError::store)?),
    })
  }

  /// Success carrying only a message.
  pub fn message(message: impl Into<String>) -> Reply {
    Reply {
      success: true,
      message: Some(message.into()),
      data:    None,
    }
  }

  /// Success carrying both a message and data.
  pub fn message_with_data<T: Serialize>(
    message: impl Into<String>,
    data: T,
  ) -> Result<Reply, ApiError> {
    Ok(Reply {
      success: true,
      message: Some(message.into()),
      data:    Some(serde_json::to_value(data).map_err(ApiError::store)?),
    })
  }
}
