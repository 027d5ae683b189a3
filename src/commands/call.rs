//! `confluence-rest call`: invoke any route by name.
//!
//! Path parameters, query pairs and extra headers come from repeated flags;
//! a JSON body is read from a file or stdin. `--dry-run` resolves the
//! request locally and prints it without sending anything.

use std::process;

use anyhow::Context;
use clap::Args;
use serde_json::Value;
use tokio::io::AsyncReadExt;
use url::Url;

use super::{connect, render_json, report_api_error};
use crate::cli::{BodySource, Cli, parse_body_source, parse_header, parse_key_value};
use crate::color::ColorScheme;
use crate::confluence::path::placeholders;
use crate::confluence::request::prepare;
use crate::confluence::{PreparedRequest, Query, RequestArgs, RequestBody, Route, find_route};

/// Options for `call`
#[derive(Debug, Args)]
pub struct CallOptions {
  /// Route name, e.g. `content.get_content_by_id`
  #[arg(value_name = "ROUTE")]
  pub route: String,

  /// Path placeholder value (repeatable)
  #[arg(short = 'p', long = "path-param", value_name = "NAME=VALUE", value_parser = parse_key_value)]
  pub path_params: Vec<(String, String)>,

  /// Query string pair; repeat a key to send it several times
  #[arg(short = 'Q', long = "query", value_name = "KEY=VALUE", value_parser = parse_key_value)]
  pub query: Vec<(String, String)>,

  /// JSON request body file, or `-` for stdin
  #[arg(long, value_name = "FILE", value_parser = parse_body_source)]
  pub body: Option<BodySource>,

  /// Extra request header (repeatable)
  #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_header)]
  pub headers: Vec<(String, String)>,

  /// Print the resolved request instead of sending it
  #[arg(long)]
  pub dry_run: bool,
}

/// Execute `call`. Exit codes: 1 for API errors, 4 for bad arguments.
pub(crate) async fn handle_call_command(options: &CallOptions, cli: &Cli, colors: &ColorScheme) {
  let Some(route) = find_route(&options.route) else {
    eprintln!("{} Unknown route `{}`", colors.error("Error:"), options.route);
    let suggestions = similar_routes(&options.route);
    if !suggestions.is_empty() {
      eprintln!("\n{}", colors.info("Did you mean one of:"));
      for name in suggestions {
        eprintln!("  {}", colors.code(name));
      }
    }
    process::exit(4);
  };

  let args = match build_args(route, options).await {
    Ok(args) => args,
    Err(e) => {
      eprintln!("{} {e:#}", colors.error("Error:"));
      process::exit(4);
    }
  };

  if options.dry_run {
    dry_run(route, args, cli, colors);
    return;
  }

  let client = connect(cli, colors);
  tracing::info!("Calling {} {}", route.method, route.name);

  match client.call(route.name, args).await {
    Ok(value) => println!("{}", render_json(&value)),
    Err(e) => {
      report_api_error(&format!("{} failed", route.name), &e, colors);
      process::exit(1);
    }
  }
}

/// Assemble request arguments from the command-line flags.
async fn build_args(route: &Route, options: &CallOptions) -> anyhow::Result<RequestArgs> {
  let missing: Vec<&str> = placeholders(route.path)
    .filter(|name| !options.path_params.iter().any(|(key, _)| key.as_str() == *name))
    .collect();
  if !missing.is_empty() {
    anyhow::bail!(
      "{} needs {} (pass each with -p NAME=VALUE)",
      route.name,
      missing.join(", ")
    );
  }
  if route.multipart {
    anyhow::bail!("{} uploads a file; use `confluence-rest upload` instead", route.name);
  }

  let mut args = RequestArgs::new().query(Query::from(options.query.clone()));
  for (name, value) in &options.path_params {
    args = args.path_param(name.as_str(), value);
  }
  for (name, value) in &options.headers {
    args = args.header(name.as_str(), value.as_str());
  }
  if let Some(source) = &options.body {
    let body = read_body(source).await?;
    args = args.json_body(&body)?;
  }

  Ok(args)
}

async fn read_body(source: &BodySource) -> anyhow::Result<Value> {
  let text = match source {
    BodySource::Stdin => {
      let mut text = String::new();
      tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read request body from stdin")?;
      text
    }
    BodySource::File(path) => tokio::fs::read_to_string(path)
      .await
      .with_context(|| format!("failed to read request body from {}", path.display()))?,
  };

  serde_json::from_str(&text).context("request body is not valid JSON")
}

/// Resolve the request against `--url` (or a placeholder host) and print it.
fn dry_run(route: &Route, args: RequestArgs, cli: &Cli, colors: &ColorScheme) {
  let base = cli.auth.url.as_deref().unwrap_or("https://confluence.invalid/wiki/rest/api");
  let prepared = Url::parse(base)
    .map_err(anyhow::Error::from)
    .and_then(|base| prepare(&base, route, args).map_err(anyhow::Error::from));

  match prepared {
    Ok(request) => print!("{}", describe_request(&request, colors)),
    Err(e) => {
      eprintln!("{} {e}", colors.error("Error:"));
      process::exit(4);
    }
  }
}

/// Human-readable rendering of a prepared request.
pub(crate) fn describe_request(request: &PreparedRequest, colors: &ColorScheme) -> String {
  let mut out = format!("{} {}\n", colors.method(request.method).trim_end(), colors.link(&request.url));
  for (name, value) in &request.headers {
    out.push_str(&format!("{}: {value}\n", colors.dimmed(name)));
  }
  match &request.body {
    RequestBody::Empty => {}
    RequestBody::Json(value) => {
      out.push('\n');
      out.push_str(&render_json(value));
      out.push('\n');
    }
    RequestBody::Multipart(form) => {
      out.push_str("\n(multipart form)\n");
      for (name, value) in &form.fields {
        out.push_str(&format!("  {name} = {value}\n"));
      }
      if let Some(file) = &form.file {
        out.push_str(&format!("  {} = @{} ({})\n", file.field, file.file_name, file.content_type));
      }
    }
  }
  out
}

/// Routes in the same group, or whose operation name matches, for a typo.
fn similar_routes(name: &str) -> Vec<&'static str> {
  let (group, operation) = name.split_once('.').unwrap_or((name, name));
  crate::confluence::all_routes()
    .filter(|route| route.group() == group || route.name.ends_with(&format!(".{operation}")))
    .map(|route| route.name)
    .take(10)
    .collect()
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;
  use crate::cli::ColorOption;

  fn options(route: &str) -> CallOptions {
    CallOptions {
      route: route.to_string(),
      path_params: Vec::new(),
      query: Vec::new(),
      body: None,
      headers: Vec::new(),
      dry_run: true,
    }
  }

  fn plain() -> ColorScheme {
    ColorScheme::new(ColorOption::Never)
  }

  #[tokio::test]
  async fn missing_path_params_are_listed() {
    let route = find_route("content.update_attachment_properties").unwrap();
    let err = build_args(route, &options(route.name)).await.unwrap_err();
    assert_eq!(
      err.to_string(),
      "content.update_attachment_properties needs id, attachmentId (pass each with -p NAME=VALUE)"
    );
  }

  #[tokio::test]
  async fn multipart_routes_are_redirected_to_upload() {
    let route = find_route("content.create_attachment").unwrap();
    let mut opts = options(route.name);
    opts.path_params.push(("id".to_string(), "1".to_string()));
    let err = build_args(route, &opts).await.unwrap_err();
    assert!(err.to_string().contains("confluence-rest upload"));
  }

  #[tokio::test]
  async fn body_file_is_sent_as_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"type":"page","title":"Hello"}}"#).unwrap();

    let route = find_route("content.create_content").unwrap();
    let mut opts = options(route.name);
    opts.body = Some(BodySource::File(file.path().to_path_buf()));
    opts.query.push(("status".to_string(), "draft".to_string()));

    let args = build_args(route, &opts).await.unwrap();
    let base = Url::parse("https://x/wiki/rest/api").unwrap();
    let request = prepare(&base, route, args).unwrap();

    assert_eq!(request.url.as_str(), "https://x/wiki/rest/api/content?status=draft");
    assert_eq!(request.header("content-type"), Some("application/json"));
    insta::assert_snapshot!(describe_request(&request, &plain()), @r#"
    POST https://x/wiki/rest/api/content?status=draft
    Accept: application/json
    Content-Type: application/json

    {
      "title": "Hello",
      "type": "page"
    }
    "#);
  }

  #[tokio::test]
  async fn invalid_json_body_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    let route = find_route("content.create_content").unwrap();
    let mut opts = options(route.name);
    opts.body = Some(BodySource::File(file.path().to_path_buf()));

    let err = build_args(route, &opts).await.unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));
  }

  #[test]
  fn similar_routes_share_group_or_operation() {
    let names = similar_routes("longtask.get_task");
    assert!(names.contains(&"long_task.get_task"));
    assert!(similar_routes("nope.nothing").is_empty());
  }
}
