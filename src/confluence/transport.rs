//! Transport abstraction and the reqwest-backed implementation.
//!
//! The [`Transport`] trait is the seam between request building and the
//! network; tests swap in fakes that record prepared requests and return
//! canned responses.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::redirect;
use tokio_util::io::ReaderStream;
use tracing::{debug, trace};

use super::config::{Credentials, ProxyConfig, TransportOptions};
use super::error::{ApiError, Result};
use super::request::{FilePart, FileSource, Multipart, PreparedRequest, RequestBody};
use super::response::{RawResponse, TransportFailure, reason_phrase};

/// Sends one prepared request and returns the raw response.
#[async_trait]
pub trait Transport: Send + Sync {
  /// Perform the HTTP round-trip for `request`.
  ///
  /// # Errors
  /// Returns a [`TransportFailure`] when no HTTP response was received.
  async fn send(
    &self,
    request: PreparedRequest,
    credentials: &Credentials,
  ) -> std::result::Result<RawResponse, TransportFailure>;
}

/// Transport backed by a shared `reqwest::Client` connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
  client: reqwest::Client,
}

impl ReqwestTransport {
  /// Build the underlying HTTP client.
  ///
  /// Redirects are never followed so that 3xx statuses surface to the
  /// caller.
  ///
  /// # Errors
  /// Returns [`ApiError::Configuration`] when the proxy URL is invalid or the
  /// client cannot be built.
  pub fn new(options: &TransportOptions, proxy: Option<&ProxyConfig>) -> Result<Self> {
    let mut builder = reqwest::Client::builder()
      .redirect(redirect::Policy::none())
      .user_agent(format!(
        "confluence-rest/{} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("TARGET")
      ));

    if let Some(timeout) = options.timeout {
      builder = builder.timeout(timeout);
    }
    if let Some(timeout) = options.connect_timeout {
      builder = builder.connect_timeout(timeout);
    }
    if let Some(idle) = options.pool_idle_timeout {
      builder = builder.pool_idle_timeout(idle);
    }
    if let Some(interval) = options.tcp_keepalive {
      builder = builder.tcp_keepalive(interval);
    }

    if let Some(proxy) = proxy {
      let mut configured = reqwest::Proxy::all(&proxy.url)
        .map_err(|e| ApiError::Configuration(format!("invalid proxy `{}`: {e}", proxy.url)))?;
      if let Some(user) = &proxy.user {
        configured = configured.basic_auth(user, proxy.password.as_deref().unwrap_or_default());
      }
      builder = builder.proxy(configured);
    }

    let client = builder
      .build()
      .map_err(|e| ApiError::Configuration(format!("failed to create HTTP client: {e}")))?;

    Ok(Self { client })
  }
}

/// Encoded `Basic` authorization header value.
pub fn basic_auth_header(credentials: &Credentials) -> String {
  let raw = format!("{}:{}", credentials.user, credentials.password);
  format!("Basic {}", BASE64.encode(raw.as_bytes()))
}

#[async_trait]
impl Transport for ReqwestTransport {
  async fn send(
    &self,
    request: PreparedRequest,
    credentials: &Credentials,
  ) -> std::result::Result<RawResponse, TransportFailure> {
    debug!("{} {} ({})", request.method, request.url, request.route);

    let mut builder = self
      .client
      .request(request.method.into(), request.url.clone())
      .header("Authorization", basic_auth_header(credentials));
    for (name, value) in &request.headers {
      builder = builder.header(name, value);
    }

    builder = match request.body {
      RequestBody::Empty => builder,
      RequestBody::Json(value) => builder.json(&value),
      RequestBody::Multipart(form) => builder.multipart(build_form(form).await?),
    };

    let response = builder.send().await.map_err(failure_from)?;
    let status = response.status();
    let content_type = response
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|value| value.to_str().ok())
      .map(str::to_string);
    let body = response.bytes().await.map_err(failure_from)?;

    trace!("{} {} -> {} ({} bytes)", request.method, request.url, status, body.len());

    Ok(RawResponse {
      status: status.as_u16(),
      reason: status
        .canonical_reason()
        .map_or_else(|| reason_phrase(status.as_u16()), str::to_string),
      content_type,
      body,
    })
  }
}

fn failure_from(err: reqwest::Error) -> TransportFailure {
  let message = if err.is_timeout() {
    format!("request timed out: {err}")
  } else if err.is_connect() {
    format!("connection failed: {err}")
  } else {
    err.to_string()
  };

  TransportFailure {
    message,
    status: err.status().map(|status| status.as_u16()),
  }
}

async fn build_form(multipart: Multipart) -> std::result::Result<Form, TransportFailure> {
  let mut form = Form::new();
  for (name, value) in multipart.fields {
    form = form.text(name, value);
  }
  if let Some(file) = multipart.file {
    let field = file.field.clone();
    form = form.part(field, file_part(file).await?);
  }
  Ok(form)
}

/// Disk-backed parts are streamed rather than read into memory.
async fn file_part(file: FilePart) -> std::result::Result<Part, TransportFailure> {
  let part = match file.source {
    FileSource::Bytes(bytes) => Part::bytes(bytes.to_vec()),
    FileSource::Path(path) => {
      let handle = tokio::fs::File::open(&path)
        .await
        .map_err(|e| TransportFailure::new(format!("failed to open {}: {e}", path.display())))?;
      let length = handle
        .metadata()
        .await
        .map_err(|e| TransportFailure::new(format!("failed to stat {}: {e}", path.display())))?
        .len();
      Part::stream_with_length(reqwest::Body::wrap_stream(ReaderStream::new(handle)), length)
    }
  };

  part
    .file_name(file.file_name)
    .mime_str(&file.content_type)
    .map_err(|e| TransportFailure::new(format!("invalid content type `{}`: {e}", file.content_type)))
}
