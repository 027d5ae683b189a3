//! CLI subcommand handlers.
//!
//! Each `confluence-rest` subcommand lives in its own module. The helpers
//! here are shared by the handlers that talk to the API.

use std::process;

use serde_json::Value;

use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::confluence::{ApiError, ClientConfig, ConfluenceClient, ProxyConfig};

pub mod auth;
pub mod call;
pub mod completions;
pub mod routes;
pub mod upload;
pub mod version;

/// Build an API client from the global options, exiting on failure.
///
/// Exits with 4 when the URL is missing or invalid and 2 when no
/// credentials can be found.
pub(crate) fn connect(cli: &Cli, colors: &ColorScheme) -> ConfluenceClient {
  let Some(base_url) = cli.auth.url.as_deref() else {
    eprintln!("{} {}", colors.error("✗"), colors.error("Base URL not provided"));
    eprintln!("  Use --url or set CONFLUENCE_URL");
    process::exit(4);
  };

  let (credential, _) = match auth::load_credentials(base_url, cli) {
    Ok(found) => found,
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error("Failed to load credentials"));
      eprintln!("  {e:#}");
      eprintln!(
        "\n{}",
        colors.dimmed("Run 'confluence-rest auth show' to see your current configuration")
      );
      process::exit(2);
    }
  };

  let mut config = ClientConfig::new(base_url, credential.username, credential.password);
  if let Some(timeout) = cli.performance.request_timeout() {
    config = config.with_timeout(timeout);
  }
  if let Some(timeout) = cli.performance.connect_timeout() {
    config = config.with_connect_timeout(timeout);
  }
  if let Some(proxy) = &cli.auth.proxy {
    config = config.with_proxy(ProxyConfig {
      url: proxy.clone(),
      user: None,
      password: None,
    });
  }

  match ConfluenceClient::new(config) {
    Ok(client) => client,
    Err(e) => {
      eprintln!("{} {}", colors.error("✗"), colors.error("Failed to create API client"));
      eprintln!("  {e}");
      process::exit(4);
    }
  }
}

/// Print an API error, including the server's error body when there is one.
pub(crate) fn report_api_error(context: &str, error: &ApiError, colors: &ColorScheme) {
  eprintln!("{} {}", colors.error("✗"), colors.error(context));
  match error.status_code() {
    Some(status) => eprintln!("  {} {}", colors.status(status), error.message()),
    None => eprintln!("  {error}"),
  }
  if let Some(body) = error.body() {
    eprintln!("{}", render_json(body));
  }
}

/// Pretty-print a JSON value; strings are printed raw.
pub(crate) fn render_json(value: &Value) -> String {
  match value {
    Value::String(text) => text.clone(),
    other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn render_json_pretty_prints_objects() {
    assert_eq!(render_json(&json!({"a": 1})), "{\n  \"a\": 1\n}");
  }

  #[test]
  fn render_json_keeps_strings_raw() {
    assert_eq!(render_json(&json!("<html/>")), "<html/>");
  }
}
