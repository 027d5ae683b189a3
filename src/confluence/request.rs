//! Per-call request arguments and the request builder.
//!
//! [`RequestArgs`] is assembled fresh for each call and consumed by
//! [`prepare`], which turns it plus a [`Route`] into a fully resolved
//! [`PreparedRequest`] that a [`Transport`](super::Transport) can send.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use reqwest::header::{HeaderName, HeaderValue};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::error::{ApiError, Result};
use super::path::{join_url, resolve_path};
use super::route::{HttpMethod, Route};

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Header Confluence requires on form posts to skip its XSRF check.
pub const XSRF_HEADER: &str = "X-Atlassian-Token";
pub const XSRF_NO_CHECK: &str = "nocheck";

/// Ordered, multi-valued query string parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query(Vec<(String, String)>);

impl Query {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append a single `key=value` pair.
  pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
    self.0.push((key.into(), value.to_string()));
    self
  }

  /// Append one pair per value, repeating the key.
  pub fn params<V: ToString>(mut self, key: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
    let key = key.into();
    self.0.extend(values.into_iter().map(|value| (key.clone(), value.to_string())));
    self
  }

  pub fn extend(mut self, other: Query) -> Self {
    self.0.extend(other.0);
    self
  }

  pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
    self.0.push((key.into(), value.to_string()));
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl<K: Into<String>, V: ToString> From<Vec<(K, V)>> for Query {
  fn from(pairs: Vec<(K, V)>) -> Self {
    pairs.into_iter().fold(Query::new(), |query, (k, v)| query.param(k, v))
  }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for Query {
  fn from(pairs: [(K, V); N]) -> Self {
    pairs.into_iter().fold(Query::new(), |query, (k, v)| query.param(k, v))
  }
}

/// Accepts a JSON object; arrays become repeated keys and `null` is skipped.
impl<'de> Deserialize<'de> for Query {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    struct QueryVisitor;

    impl<'de> Visitor<'de> for QueryVisitor {
      type Value = Query;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of query parameters")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Query, A::Error> {
        let mut query = Query::new();
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
          match value {
            Value::Null => {}
            Value::Array(items) => {
              for item in items {
                query.push(key.clone(), scalar_to_string(item).map_err(de::Error::custom)?);
              }
            }
            other => query.push(key, scalar_to_string(other).map_err(de::Error::custom)?),
          }
        }
        Ok(query)
      }
    }

    deserializer.deserialize_map(QueryVisitor)
  }
}

fn scalar_to_string(value: Value) -> std::result::Result<String, String> {
  match value {
    Value::String(s) => Ok(s),
    Value::Bool(b) => Ok(b.to_string()),
    Value::Number(n) => Ok(n.to_string()),
    other => Err(format!("query values must be scalars, got {other}")),
  }
}

/// Where the bytes of an uploaded file come from.
#[derive(Debug, Clone)]
pub enum FileSource {
  /// Streamed from disk when the request is sent.
  Path(PathBuf),
  Bytes(Bytes),
}

/// The single binary part of a multipart form.
#[derive(Debug, Clone)]
pub struct FilePart {
  /// Form field name, `file` for Confluence attachments.
  pub field: String,
  pub file_name: String,
  pub content_type: String,
  pub source: FileSource,
}

/// A multipart form: text fields plus at most one file.
#[derive(Debug, Clone, Default)]
pub struct Multipart {
  pub fields: Vec<(String, String)>,
  pub file: Option<FilePart>,
}

impl Multipart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Form for an attachment upload. The content type is guessed from the
  /// file name.
  pub fn attachment(source: FileSource, file_name: impl Into<String>) -> Self {
    let file_name = file_name.into();
    let content_type = mime_guess::from_path(&file_name).first_or_octet_stream().to_string();
    Self::new().file(FilePart {
      field: "file".to_string(),
      file_name,
      content_type,
      source,
    })
  }

  /// Attachment form reading the file at `path`, named after its final
  /// component.
  pub fn attachment_from_path(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let file_name = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_else(|| "upload".to_string());
    Self::attachment(FileSource::Path(path), file_name)
  }

  pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.fields.push((name.into(), value.into()));
    self
  }

  /// Replace the file part.
  pub fn file(mut self, part: FilePart) -> Self {
    self.file = Some(part);
    self
  }

  pub fn comment(self, comment: impl Into<String>) -> Self {
    self.field("comment", comment)
  }

  pub fn minor_edit(self, minor: bool) -> Self {
    self.field("minorEdit", minor.to_string())
  }
}

/// Arguments for one call.
#[derive(Debug, Clone, Default)]
pub struct RequestArgs {
  pub path_params: BTreeMap<String, String>,
  pub query: Query,
  pub headers: Vec<(String, String)>,
  pub body: Option<Value>,
  pub multipart: Option<Multipart>,
}

impl RequestArgs {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
    self.path_params.insert(name.into(), value.to_string());
    self
  }

  /// Merge `query` into the arguments' query string.
  pub fn query(mut self, query: impl Into<Option<Query>>) -> Self {
    if let Some(query) = query.into() {
      self.query = std::mem::take(&mut self.query).extend(query);
    }
    self
  }

  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }

  /// Attach a JSON body.
  ///
  /// # Errors
  /// Fails when `body` cannot be represented as JSON.
  pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
    let value = serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(format!("unserializable body: {e}")))?;
    self.body = Some(value);
    Ok(self)
  }

  pub fn multipart(mut self, form: Multipart) -> Self {
    self.multipart = Some(form);
    self
  }
}

/// Body of a prepared request.
#[derive(Debug, Clone)]
pub enum RequestBody {
  Empty,
  Json(Value),
  Multipart(Multipart),
}

/// A fully resolved request, ready for the transport.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
  pub route: &'static str,
  pub method: HttpMethod,
  pub url: Url,
  pub headers: Vec<(String, String)>,
  pub body: RequestBody,
}

impl PreparedRequest {
  /// Value of the header `name` (case-insensitive).
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .iter()
      .find(|(key, _)| key.eq_ignore_ascii_case(name))
      .map(|(_, value)| value.as_str())
  }
}

/// Build the request for `route` against `base_url`.
///
/// # Errors
/// - [`ApiError::MissingPathParameter`] when a placeholder has no value.
/// - [`ApiError::InvalidRequest`] when a multipart form is sent to a JSON
///   route or the other way round, or when a caller header is not a valid
///   HTTP header.
pub fn prepare(base_url: &Url, route: &Route, args: RequestArgs) -> Result<PreparedRequest> {
  let path = resolve_path(route.path, &args.path_params).map_err(|missing| ApiError::MissingPathParameter {
    route: route.name.to_string(),
    name: missing.0,
  })?;
  let url = join_url(base_url, &path, args.query.iter());

  let mut headers = vec![(ACCEPT.to_string(), JSON_CONTENT_TYPE.to_string())];

  let body = match (route.multipart, args.body, args.multipart) {
    (true, None, Some(form)) => {
      headers.push((XSRF_HEADER.to_string(), XSRF_NO_CHECK.to_string()));
      RequestBody::Multipart(form)
    }
    (true, _, None) => {
      return Err(ApiError::InvalidRequest(format!("route `{}` requires a multipart form", route.name)));
    }
    (true, Some(_), Some(_)) => {
      return Err(ApiError::InvalidRequest(format!(
        "route `{}` takes a multipart form, not a JSON body",
        route.name
      )));
    }
    (false, _, Some(_)) => {
      return Err(ApiError::InvalidRequest(format!(
        "route `{}` does not accept multipart forms",
        route.name
      )));
    }
    (false, Some(value), None) => {
      headers.push((CONTENT_TYPE.to_string(), JSON_CONTENT_TYPE.to_string()));
      RequestBody::Json(value)
    }
    (false, None, None) => RequestBody::Empty,
  };

  for (name, value) in args.headers {
    check_header(&name, &value)?;
    headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
    headers.push((name, value));
  }

  Ok(PreparedRequest {
    route: route.name,
    method: route.method,
    url,
    headers,
    body,
  })
}

fn check_header(name: &str, value: &str) -> Result<()> {
  HeaderName::from_bytes(name.as_bytes())
    .map_err(|_| ApiError::InvalidRequest(format!("invalid header name `{name}`")))?;
  HeaderValue::from_str(value)
    .map_err(|_| ApiError::InvalidRequest(format!("invalid value for header `{name}`")))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  const GET_BY_ID: Route = Route::get("content.get_content_by_id", "/content/{id}");
  const UPDATE: Route = Route::put("content.update_content", "/content/{id}");
  const UPLOAD: Route = Route::multipart("content.create_attachment", "/content/{id}/child/attachment");

  fn base() -> Url {
    Url::parse("https://x/wiki/rest/api").unwrap()
  }

  #[test]
  fn get_request_has_accept_header_only() {
    let request = prepare(
      &base(),
      &GET_BY_ID,
      RequestArgs::new().path_param("id", 123).query(Query::new().param("expand", "body.storage")),
    )
    .unwrap();

    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(
      request.url.as_str(),
      "https://x/wiki/rest/api/content/123?expand=body.storage"
    );
    assert_eq!(request.header("accept"), Some("application/json"));
    assert_eq!(request.header("content-type"), None);
    assert!(matches!(request.body, RequestBody::Empty));
  }

  #[test]
  fn missing_identifier_fails_before_io() {
    let err = prepare(&base(), &GET_BY_ID, RequestArgs::new()).unwrap_err();
    match err {
      ApiError::MissingPathParameter { route, name } => {
        assert_eq!(route, "content.get_content_by_id");
        assert_eq!(name, "id");
      }
      other => panic!("unexpected error: {other:?}"),
    }
  }

  #[test]
  fn json_body_sets_content_type() {
    let args = RequestArgs::new()
      .path_param("id", "42")
      .json_body(&json!({"version": {"number": 2}}))
      .unwrap();
    let request = prepare(&base(), &UPDATE, args).unwrap();

    assert_eq!(request.header("Content-Type"), Some("application/json"));
    match request.body {
      RequestBody::Json(value) => assert_eq!(value["version"]["number"], 2),
      other => panic!("unexpected body: {other:?}"),
    }
  }

  #[test]
  fn multipart_adds_xsrf_header() {
    let form = Multipart::attachment(FileSource::Bytes(Bytes::from_static(b"hi")), "notes.txt").comment("first");
    let request = prepare(&base(), &UPLOAD, RequestArgs::new().path_param("id", "7").multipart(form)).unwrap();

    assert_eq!(request.header("X-Atlassian-Token"), Some("nocheck"));
    assert_eq!(request.header("Content-Type"), None);
    match request.body {
      RequestBody::Multipart(form) => {
        let file = form.file.unwrap();
        assert_eq!(file.content_type, "text/plain");
        assert_eq!(form.fields, vec![("comment".to_string(), "first".to_string())]);
      }
      other => panic!("unexpected body: {other:?}"),
    }
  }

  #[test]
  fn multipart_route_rejects_missing_form() {
    let err = prepare(&base(), &UPLOAD, RequestArgs::new().path_param("id", "7")).unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
  }

  #[test]
  fn malformed_caller_headers_are_rejected_locally() {
    let args = RequestArgs::new().path_param("id", "7").header("Bad Header", "x");
    let err = prepare(&base(), &GET_BY_ID, args).unwrap_err();
    assert_eq!(err.message(), "invalid header name `Bad Header`");

    let args = RequestArgs::new().path_param("id", "7").header("X-Trace", "line\nbreak");
    let err = prepare(&base(), &GET_BY_ID, args).unwrap_err();
    assert_eq!(err.message(), "invalid value for header `X-Trace`");
  }

  #[test]
  fn json_route_rejects_multipart() {
    let args = RequestArgs::new().path_param("id", "7").multipart(Multipart::new());
    let err = prepare(&base(), &UPDATE, args).unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
  }

  #[test]
  fn caller_headers_override_defaults() {
    let args = RequestArgs::new()
      .path_param("id", "1")
      .header("accept", "application/xml")
      .header("X-Trace", "abc");
    let request = prepare(&base(), &GET_BY_ID, args).unwrap();

    assert_eq!(request.header("Accept"), Some("application/xml"));
    assert_eq!(request.header("x-trace"), Some("abc"));
    assert_eq!(request.headers.len(), 2);
  }

  #[test]
  fn query_from_json_object_repeats_array_values() {
    let query: Query = serde_json::from_value(json!({
      "spaceKey": ["DOCS", "ENG"],
      "limit": 10,
      "favourite": true,
      "skip": null
    }))
    .unwrap();

    let pairs: Vec<_> = query.iter().collect();
    assert!(pairs.contains(&("spaceKey", "DOCS")));
    assert!(pairs.contains(&("spaceKey", "ENG")));
    assert!(pairs.contains(&("limit", "10")));
    assert!(pairs.contains(&("favourite", "true")));
    assert_eq!(pairs.len(), 4);
  }

  #[test]
  fn query_rejects_nested_objects() {
    let result: std::result::Result<Query, _> = serde_json::from_value(json!({"a": {"b": 1}}));
    assert!(result.is_err());
  }

  #[test]
  fn attachment_from_path_uses_file_name() {
    let form = Multipart::attachment_from_path("/tmp/diagram.png").minor_edit(true);
    let file = form.file.as_ref().unwrap();
    assert_eq!(file.file_name, "diagram.png");
    assert_eq!(file.content_type, "image/png");
    assert_eq!(form.fields, vec![("minorEdit".to_string(), "true".to_string())]);
  }
}
