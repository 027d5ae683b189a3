//! Connection configuration for [`ConfluenceClient`](super::ConfluenceClient).
//!
//! [`ClientConfig`] is the caller-facing shape: every field is optional so a
//! config assembled from flags, environment variables or a JSON document can
//! be validated in one place. Validation produces a [`ValidatedConfig`],
//! which is what the client and its resources actually read.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::{ApiError, Result};

/// Caller-supplied client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
  /// REST API root, e.g. `https://example.atlassian.net/wiki/rest/api`.
  pub base_url: Option<String>,
  /// Account name (email address on Atlassian Cloud).
  pub user: Option<String>,
  /// Password or API token.
  pub password: Option<String>,
  /// Outbound HTTP proxy.
  #[serde(default)]
  pub proxy: Option<ProxyConfig>,
  /// Overrides for the mimetypes recognised when decoding responses.
  #[serde(default)]
  pub mimetypes: Option<Mimetypes>,
  /// Connection tuning applied once when the transport is built.
  #[serde(default)]
  pub transport: TransportOptions,
}

/// Proxy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyConfig {
  pub url: String,
  #[serde(default)]
  pub user: Option<String>,
  #[serde(default)]
  pub password: Option<String>,
}

/// Content types treated as JSON or XML when decoding a response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mimetypes {
  pub json: Vec<String>,
  pub xml: Vec<String>,
}

impl Default for Mimetypes {
  fn default() -> Self {
    Self {
      json: vec!["application/json".to_string(), "application/json;charset=utf-8".to_string()],
      xml: vec!["application/xml".to_string(), "application/xml;charset=utf-8".to_string()],
    }
  }
}

impl Mimetypes {
  /// Whether `content_type` is one of the configured JSON types.
  pub fn is_json(&self, content_type: &str) -> bool {
    matches_any(&self.json, content_type)
  }

  /// Whether `content_type` is one of the configured XML types.
  pub fn is_xml(&self, content_type: &str) -> bool {
    matches_any(&self.xml, content_type)
  }
}

fn matches_any(candidates: &[String], content_type: &str) -> bool {
  let wanted = canonical_mimetype(content_type);
  candidates.iter().any(|candidate| canonical_mimetype(candidate) == wanted)
}

/// Lowercase and strip whitespace around parameters so that
/// `Application/JSON; charset=UTF-8` matches `application/json;charset=utf-8`.
fn canonical_mimetype(value: &str) -> String {
  value
    .split(';')
    .map(|part| part.trim().to_ascii_lowercase())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(";")
}

/// Transport tuning. `None` leaves the reqwest default in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOptions {
  /// Total request timeout.
  #[serde(default)]
  pub timeout: Option<Duration>,
  #[serde(default)]
  pub connect_timeout: Option<Duration>,
  /// How long idle pooled connections are kept.
  #[serde(default)]
  pub pool_idle_timeout: Option<Duration>,
  /// TCP keep-alive interval.
  #[serde(default)]
  pub tcp_keepalive: Option<Duration>,
}

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
  pub user: String,
  pub password: String,
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("user", &self.user)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Configuration after validation; immutable for the client's lifetime.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
  pub base_url: Url,
  pub credentials: Credentials,
  pub proxy: Option<ProxyConfig>,
  pub mimetypes: Mimetypes,
  pub transport: TransportOptions,
}

impl ClientConfig {
  /// Config with the three required fields set.
  pub fn new(base_url: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
    Self {
      base_url: Some(base_url.into()),
      user: Some(user.into()),
      password: Some(password.into()),
      ..Self::default()
    }
  }

  pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
    self.proxy = Some(proxy);
    self
  }

  pub fn with_mimetypes(mut self, mimetypes: Mimetypes) -> Self {
    self.mimetypes = Some(mimetypes);
    self
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.transport.timeout = Some(timeout);
    self
  }

  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.transport.connect_timeout = Some(timeout);
    self
  }

  pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
    self.transport.pool_idle_timeout = Some(timeout);
    self
  }

  pub fn with_keep_alive(mut self, interval: Duration) -> Self {
    self.transport.tcp_keepalive = Some(interval);
    self
  }

  /// Check required fields and normalize the base URL.
  ///
  /// # Errors
  /// Returns [`ApiError::Configuration`] when the credentials or the base URL
  /// are missing, or when the base URL cannot be parsed as a URL at all.
  pub fn validate(self) -> Result<ValidatedConfig> {
    let (user, password) = match (non_empty(self.user), non_empty(self.password)) {
      (Some(user), Some(password)) => (user, password),
      _ => return Err(ApiError::Configuration("user and password are required".to_string())),
    };

    let base_url = non_empty(self.base_url).ok_or_else(|| ApiError::Configuration("baseUrl is required".to_string()))?;
    let base_url = parse_base_url(&base_url)?;

    Ok(ValidatedConfig {
      base_url,
      credentials: Credentials { user, password },
      proxy: self.proxy,
      mimetypes: self.mimetypes.unwrap_or_default(),
      transport: self.transport,
    })
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

fn parse_base_url(raw: &str) -> Result<Url> {
  Url::parse(raw.trim_end_matches('/'))
    .map_err(|e| ApiError::Configuration(format!("invalid baseUrl `{raw}`: {e}")))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn validate_accepts_complete_config() {
    let config = ClientConfig::new("https://x/wiki/rest/api/", "a", "b").validate().unwrap();

    assert_eq!(config.base_url.as_str(), "https://x/wiki/rest/api");
    assert_eq!(config.credentials.user, "a");
    assert_eq!(config.credentials.password, "b");
    assert_eq!(config.mimetypes, Mimetypes::default());
  }

  #[test]
  fn validate_requires_credentials() {
    let config = ClientConfig {
      base_url: Some("https://x/wiki/rest/api".to_string()),
      ..ClientConfig::default()
    };

    let err = config.validate().unwrap_err();
    assert_eq!(err.message(), "user and password are required");
  }

  #[test]
  fn validate_requires_password_even_with_user() {
    let config = ClientConfig {
      base_url: Some("https://x/wiki/rest/api".to_string()),
      user: Some("a".to_string()),
      ..ClientConfig::default()
    };

    assert_eq!(config.validate().unwrap_err().message(), "user and password are required");
  }

  #[test]
  fn validate_requires_base_url() {
    let config = ClientConfig {
      user: Some("a".to_string()),
      password: Some("b".to_string()),
      ..ClientConfig::default()
    };

    assert_eq!(config.validate().unwrap_err().message(), "baseUrl is required");
  }

  #[test]
  fn validate_rejects_relative_base_url() {
    let err = ClientConfig::new("/wiki/rest/api", "a", "b").validate().unwrap_err();
    assert!(matches!(err, ApiError::Configuration(_)));
  }

  #[test]
  fn validate_leaves_scheme_to_the_server() {
    let config = ClientConfig::new("ftp://x/wiki/rest/api", "a", "b").validate().unwrap();
    assert_eq!(config.base_url.as_str(), "ftp://x/wiki/rest/api");

    let config = ClientConfig::new("localhost:8090/wiki/rest/api", "a", "b").validate().unwrap();
    assert_eq!(config.base_url.scheme(), "localhost");
  }

  #[test]
  fn validate_accepts_whitespace_credentials() {
    let config = ClientConfig::new("https://x/wiki/rest/api", "  ", " ").validate().unwrap();
    assert_eq!(config.credentials.user, "  ");
  }

  #[test]
  fn validate_rejects_empty_credentials() {
    let err = ClientConfig::new("https://x/wiki/rest/api", "", "b").validate().unwrap_err();
    assert_eq!(err.message(), "user and password are required");
  }

  #[test]
  fn validate_requires_user_even_with_password() {
    let config = ClientConfig {
      base_url: Some("https://x/wiki/rest/api".to_string()),
      password: Some("b".to_string()),
      ..ClientConfig::default()
    };

    assert_eq!(config.validate().unwrap_err().message(), "user and password are required");
  }

  #[test]
  fn mimetype_matching_ignores_case_and_spacing() {
    let mimetypes = Mimetypes::default();
    assert!(mimetypes.is_json("Application/JSON; charset=UTF-8"));
    assert!(mimetypes.is_json("application/json"));
    assert!(mimetypes.is_xml("application/xml;charset=utf-8"));
    assert!(!mimetypes.is_json("text/html"));
  }

  #[test]
  fn credentials_debug_redacts_password() {
    let creds = Credentials {
      user: "a".to_string(),
      password: "secret".to_string(),
    };
    let rendered = format!("{creds:?}");
    assert!(!rendered.contains("secret"));
  }

  #[test]
  fn config_deserializes_from_camel_case_json() {
    let config: ClientConfig = serde_json::from_value(serde_json::json!({
      "baseUrl": "https://x/wiki/rest/api",
      "user": "a",
      "password": "b",
      "mimetypes": { "json": ["application/json"], "xml": [] }
    }))
    .unwrap();

    let validated = config.validate().unwrap();
    assert_eq!(validated.mimetypes.json, vec!["application/json".to_string()]);
    assert!(validated.mimetypes.xml.is_empty());
  }
}
