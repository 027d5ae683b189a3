//! Error taxonomy shared by every Confluence operation.
//!
//! Local failures (bad configuration, a missing path identifier, an
//! unserializable body) are reported before any network traffic happens.
//! Everything that reaches the wire comes back either as a [`ApiError::Transport`]
//! or an [`ApiError::Remote`] failure.

use serde_json::Value;
use thiserror::Error;

/// Status reported for transport failures that carry no HTTP status.
pub const LOCAL_FAILURE_STATUS: u16 = 500;

/// Errors surfaced by the Confluence client.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The client configuration is missing required fields or is malformed.
  #[error("invalid client configuration: {0}")]
  Configuration(String),

  /// A route template references a placeholder the caller did not supply.
  #[error("route `{route}` is missing path parameter `{name}`")]
  MissingPathParameter { route: String, name: String },

  /// The request could not be assembled (unknown route, bad body, unreadable
  /// upload file).
  #[error("invalid request: {0}")]
  InvalidRequest(String),

  /// The request never produced an HTTP response (DNS, refused connection,
  /// timeout, ...).
  #[error("transport error ({status}): {message}")]
  Transport { status: u16, message: String },

  /// The server answered with a status above 300.
  #[error("{status} {message}")]
  Remote {
    status: u16,
    message: String,
    /// Decoded error payload returned by the server, when there was one.
    body: Option<Value>,
  },
}

impl ApiError {
  /// Numeric status associated with the failure.
  ///
  /// Local programming errors have no status; transport errors default to
  /// [`LOCAL_FAILURE_STATUS`].
  pub fn status_code(&self) -> Option<u16> {
    match self {
      Self::Transport { status, .. } | Self::Remote { status, .. } => Some(*status),
      Self::Configuration(_) | Self::MissingPathParameter { .. } | Self::InvalidRequest(_) => None,
    }
  }

  /// Human-readable message without the variant prefix.
  pub fn message(&self) -> String {
    match self {
      Self::Configuration(message) | Self::InvalidRequest(message) => message.clone(),
      Self::Transport { message, .. } | Self::Remote { message, .. } => message.clone(),
      Self::MissingPathParameter { name, .. } => format!("missing path parameter `{name}`"),
    }
  }

  /// Decoded error payload for remote failures.
  pub fn body(&self) -> Option<&Value> {
    match self {
      Self::Remote { body, .. } => body.as_ref(),
      _ => None,
    }
  }
}

/// Result alias used throughout the client.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn remote_error_exposes_status_and_reason() {
    let err = ApiError::Remote {
      status: 404,
      message: "Not Found".to_string(),
      body: Some(json!({"message": "No content found with id: 1"})),
    };

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.message(), "Not Found");
    assert_eq!(err.to_string(), "404 Not Found");
    assert_eq!(err.body().unwrap()["message"], "No content found with id: 1");
  }

  #[test]
  fn local_errors_have_no_status() {
    let err = ApiError::MissingPathParameter {
      route: "content.get_content_by_id".to_string(),
      name: "id".to_string(),
    };
    assert_eq!(err.status_code(), None);
    assert!(err.to_string().contains("`id`"));

    assert_eq!(ApiError::Configuration("baseUrl is required".into()).status_code(), None);
  }
}
