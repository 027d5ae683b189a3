//! Response normalization.
//!
//! Every operation funnels its outcome through [`normalize`], which maps
//! transport failures and non-success statuses to [`ApiError`] and makes sure
//! a successful call always yields a JSON value.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use tracing::warn;

use super::config::Mimetypes;
use super::error::{ApiError, LOCAL_FAILURE_STATUS, Result};

/// Raw HTTP response as handed back by a transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
  pub status: u16,
  /// Reason phrase for `status`.
  pub reason: String,
  pub content_type: Option<String>,
  pub body: Bytes,
}

impl RawResponse {
  /// Response whose reason phrase is the canonical one for `status`.
  pub fn new(status: u16, content_type: Option<String>, body: impl Into<Bytes>) -> Self {
    Self {
      status,
      reason: reason_phrase(status),
      content_type,
      body: body.into(),
    }
  }

  /// JSON response with the canonical reason phrase.
  pub fn json(status: u16, value: &Value) -> Self {
    Self::new(status, Some("application/json".to_string()), value.to_string())
  }

  /// Response without a body.
  pub fn empty(status: u16) -> Self {
    Self::new(status, None, Bytes::new())
  }
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone)]
pub struct TransportFailure {
  pub message: String,
  /// Status attached by the transport, if any.
  pub status: Option<u16>,
}

impl TransportFailure {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      status: None,
    }
  }
}

/// Canonical reason phrase for `status`, or `"Unknown"`.
pub fn reason_phrase(status: u16) -> String {
  reqwest::StatusCode::from_u16(status)
    .ok()
    .and_then(|code| code.canonical_reason())
    .unwrap_or("Unknown")
    .to_string()
}

/// Collapse a transport outcome into the uniform result.
///
/// - transport failure: [`ApiError::Transport`], status defaults to 500;
/// - status above 300: [`ApiError::Remote`] carrying the reason phrase and
///   whatever error payload the server sent;
/// - empty body: `{"code": status, "message": reason}`;
/// - otherwise the decoded body, unchanged.
pub fn normalize(outcome: std::result::Result<RawResponse, TransportFailure>, mimetypes: &Mimetypes) -> Result<Value> {
  let response = match outcome {
    Ok(response) => response,
    Err(failure) => {
      return Err(ApiError::Transport {
        status: failure.status.unwrap_or(LOCAL_FAILURE_STATUS),
        message: failure.message,
      });
    }
  };

  if response.status > 300 {
    let body = (!is_blank(&response.body)).then(|| decode_body(&response, mimetypes));
    return Err(ApiError::Remote {
      status: response.status,
      message: response.reason,
      body,
    });
  }

  let data = if is_blank(&response.body) {
    Value::Null
  } else {
    decode_body(&response, mimetypes)
  };

  match data {
    Value::Null => Ok(json!({ "code": response.status, "message": response.reason })),
    data => Ok(data),
  }
}

/// Deserialize normalized data into a typed model.
///
/// # Errors
/// Returns [`ApiError::InvalidRequest`] when the payload does not match `T`.
pub fn from_data<T: DeserializeOwned>(data: Value) -> Result<T> {
  serde_json::from_value(data).map_err(|e| ApiError::InvalidRequest(format!("unexpected response shape: {e}")))
}

fn is_blank(body: &[u8]) -> bool {
  body.iter().all(u8::is_ascii_whitespace)
}

/// Decode by declared content type; never fails.
fn decode_body(response: &RawResponse, mimetypes: &Mimetypes) -> Value {
  let text = String::from_utf8_lossy(&response.body);
  let content_type = response.content_type.as_deref().unwrap_or_default();

  if mimetypes.is_xml(content_type) {
    match xml_to_value(&text) {
      Ok(value) => return value,
      Err(e) => warn!("Response declared {content_type} but is not well-formed XML: {e}"),
    }
  } else if mimetypes.is_json(content_type) {
    match serde_json::from_str(&text) {
      Ok(value) => return value,
      Err(e) => warn!("Response declared {content_type} but is not valid JSON: {e}"),
    }
  } else if let Ok(value) = serde_json::from_str(&text) {
    return value;
  }

  Value::String(text.into_owned())
}

/// Convert an XML document into JSON.
///
/// Elements become objects keyed by child name, attributes are collected
/// under `"$"`, text under `"_"`. Repeated children become arrays. A
/// text-only element without attributes collapses to a string.
fn xml_to_value(text: &str) -> std::result::Result<Value, roxmltree::Error> {
  let document = roxmltree::Document::parse(text)?;
  let root = document.root_element();
  let mut wrapper = Map::new();
  wrapper.insert(root.tag_name().name().to_string(), element_to_value(root));
  Ok(Value::Object(wrapper))
}

fn element_to_value(node: roxmltree::Node<'_, '_>) -> Value {
  let mut object = Map::new();

  let attributes: Map<String, Value> = node
    .attributes()
    .map(|attr| (attr.name().to_string(), Value::String(attr.value().to_string())))
    .collect();
  if !attributes.is_empty() {
    object.insert("$".to_string(), Value::Object(attributes));
  }

  let mut text = String::new();
  for child in node.children() {
    if child.is_text() {
      text.push_str(child.text().unwrap_or_default());
      continue;
    }
    if !child.is_element() {
      continue;
    }

    let name = child.tag_name().name().to_string();
    let value = element_to_value(child);
    match object.get_mut(&name) {
      Some(Value::Array(items)) => items.push(value),
      Some(existing) => {
        let first = existing.take();
        *existing = Value::Array(vec![first, value]);
      }
      None => {
        object.insert(name, value);
      }
    }
  }

  let text = text.trim();
  if object.is_empty() {
    return Value::String(text.to_string());
  }
  if !text.is_empty() {
    object.insert("_".to_string(), Value::String(text.to_string()));
  }
  Value::Object(object)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn mimetypes() -> Mimetypes {
    Mimetypes::default()
  }

  #[test]
  fn transport_failure_defaults_to_500() {
    let err = normalize(Err(TransportFailure::new("connection refused")), &mimetypes()).unwrap_err();
    match err {
      ApiError::Transport { status, message } => {
        assert_eq!(status, 500);
        assert_eq!(message, "connection refused");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn transport_failure_keeps_attached_status() {
    let failure = TransportFailure {
      message: "gateway timeout".to_string(),
      status: Some(504),
    };
    let err = normalize(Err(failure), &mimetypes()).unwrap_err();
    assert_eq!(err.status_code(), Some(504));
  }

  #[test]
  fn not_found_uses_reason_phrase() {
    let err = normalize(Ok(RawResponse::empty(404)), &mimetypes()).unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.message(), "Not Found");
    assert!(err.body().is_none());
  }

  #[test]
  fn remote_error_attaches_decoded_body() {
    let payload = json!({"statusCode": 400, "message": "Invalid cql"});
    let err = normalize(Ok(RawResponse::json(400, &payload)), &mimetypes()).unwrap_err();

    assert_eq!(err.message(), "Bad Request");
    assert_eq!(err.body(), Some(&payload));
  }

  #[test]
  fn redirects_are_errors() {
    let err = normalize(Ok(RawResponse::empty(302)), &mimetypes()).unwrap_err();
    assert_eq!(err.status_code(), Some(302));
    assert_eq!(err.message(), "Found");
  }

  #[test]
  fn status_300_is_not_an_error() {
    let data = normalize(Ok(RawResponse::empty(300)), &mimetypes()).unwrap();
    assert_eq!(data, json!({"code": 300, "message": "Multiple Choices"}));
  }

  #[test]
  fn no_content_is_synthesized() {
    let data = normalize(Ok(RawResponse::empty(204)), &mimetypes()).unwrap();
    assert_eq!(data, json!({"code": 204, "message": "No Content"}));
  }

  #[test]
  fn whitespace_body_counts_as_empty() {
    let response = RawResponse::new(200, Some("application/json".to_string()), "  \n");
    let data = normalize(Ok(response), &mimetypes()).unwrap();
    assert_eq!(data, json!({"code": 200, "message": "OK"}));
  }

  #[test]
  fn json_null_body_counts_as_empty() {
    let response = RawResponse::new(200, Some("application/json".to_string()), "null");
    let data = normalize(Ok(response), &mimetypes()).unwrap();
    assert_eq!(data, json!({"code": 200, "message": "OK"}));
  }

  #[test]
  fn json_body_passes_through_unchanged() {
    let payload = json!({"results": [{"id": "1", "title": "Home"}], "size": 1});
    let data = normalize(Ok(RawResponse::json(200, &payload)), &mimetypes()).unwrap();
    assert_eq!(data, payload);
  }

  #[test]
  fn undeclared_content_type_still_parses_json() {
    let response = RawResponse::new(200, None, r#"{"id":"1"}"#);
    assert_eq!(normalize(Ok(response), &mimetypes()).unwrap(), json!({"id": "1"}));
  }

  #[test]
  fn plain_text_becomes_string() {
    let response = RawResponse::new(200, Some("text/plain".to_string()), "pong");
    assert_eq!(normalize(Ok(response), &mimetypes()).unwrap(), json!("pong"));
  }

  #[test]
  fn malformed_json_falls_back_to_text() {
    let response = RawResponse::new(200, Some("application/json".to_string()), "{oops");
    assert_eq!(normalize(Ok(response), &mimetypes()).unwrap(), json!("{oops"));
  }

  #[test]
  fn xml_body_is_converted() {
    let body = r#"<space key="DOCS"><name>Documentation</name><label>a</label><label>b</label></space>"#;
    let response = RawResponse::new(200, Some("application/xml".to_string()), body);
    let data = normalize(Ok(response), &mimetypes()).unwrap();

    assert_eq!(
      data,
      json!({
        "space": {
          "$": {"key": "DOCS"},
          "name": "Documentation",
          "label": ["a", "b"]
        }
      })
    );
  }

  #[test]
  fn custom_mimetypes_change_decoding() {
    let mimetypes = Mimetypes {
      json: vec!["application/vnd.custom+json".to_string()],
      xml: vec![],
    };
    let response = RawResponse::new(200, Some("application/vnd.custom+json".to_string()), "[1,2]");
    assert_eq!(normalize(Ok(response), &mimetypes).unwrap(), json!([1, 2]));
  }

  #[test]
  fn from_data_reports_shape_mismatch() {
    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Named {
      name: String,
    }

    let err = from_data::<Named>(json!({"id": 1})).unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
  }
}
