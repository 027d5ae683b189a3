//! Command-line interface definitions for confluence-rest.
//!
//! Global options (connection, behavior, timeouts) are flattened onto the
//! top-level parser so they can appear before or after the subcommand.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use url::Url;

use crate::color::ColorScheme;
use crate::commands::auth::handle_auth_command;
use crate::commands::call::{CallOptions, handle_call_command};
use crate::commands::completions::handle_completions_command;
use crate::commands::routes::handle_routes_command;
use crate::commands::upload::{UploadOptions, handle_upload_command};
use crate::commands::version::handle_version_command;

/// Path appended to a bare site URL to reach the REST API root.
pub const DEFAULT_API_PATH: &str = "/wiki/rest/api";

/// confluence-rest - Call the Confluence REST API from the command line
#[derive(Debug, Parser)]
#[command(
  name = "confluence-rest",
  version,
  about = "Call the Confluence REST API from the command line",
  long_about = "A command-line client for the Confluence REST API.\n\
                Invokes any route by name, uploads attachments and lists the available operations.",
  styles = get_clap_styles()
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,

  /// Connection and authentication options
  #[command(flatten)]
  pub auth: AuthOptions,

  /// Behavior options
  #[command(flatten)]
  pub behavior: BehaviorOptions,

  /// Performance options
  #[command(flatten)]
  pub performance: PerformanceOptions,
}

#[derive(Debug, Subcommand)]
pub enum Command {
  /// Invoke any API route by name (see `routes`)
  Call(CallOptions),

  /// Upload a file as a new attachment or a new version of one
  Upload(UploadOptions),

  /// List the available API routes
  Routes {
    /// Only show routes in this group (e.g. `content`, `space`)
    #[arg(long, value_name = "GROUP")]
    group: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Authentication testing and inspection
  Auth {
    #[command(subcommand)]
    subcommand: AuthCommand,
  },

  /// Display version and build information
  Version {
    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Show only version number
    #[arg(long)]
    short: bool,
  },

  /// Generate shell completion scripts
  Completions {
    /// Target shell for completions
    #[arg(value_enum)]
    shell: Shell,
  },
}

/// Authentication subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum AuthCommand {
  /// Fetch the current user to verify the credentials
  Test,
  /// Show where the URL and credentials were resolved from
  Show,
}

/// Shells supported by `completions`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
  Bash,
  Zsh,
  Fish,
  Powershell,
  Elvish,
}

/// Normalize a Confluence URL into a REST API root.
///
/// Adds `https://` when no scheme is given and appends [`DEFAULT_API_PATH`]
/// when the URL names only a site.
pub fn normalize_url(url: &str) -> Result<String, String> {
  let trimmed = url.trim();
  let candidate = if trimmed.contains("://") {
    trimmed.to_string()
  } else {
    format!("https://{trimmed}")
  };

  let mut parsed = Url::parse(&candidate).map_err(|e| format!("Invalid URL: {e}"))?;
  if parsed.path() == "/" || parsed.path().is_empty() {
    parsed.set_path(DEFAULT_API_PATH);
  }

  let mut url_str = parsed.to_string();
  while url_str.ends_with('/') {
    url_str.pop();
  }

  Ok(url_str)
}

/// Parse a `name=value` pair.
pub(crate) fn parse_key_value(input: &str) -> Result<(String, String), String> {
  let (key, value) = input
    .split_once('=')
    .ok_or_else(|| format!("expected NAME=VALUE, got `{input}`"))?;
  if key.is_empty() {
    return Err(format!("empty name in `{input}`"));
  }
  Ok((key.to_string(), value.to_string()))
}

/// Parse a `Name: value` header.
pub(crate) fn parse_header(input: &str) -> Result<(String, String), String> {
  let (name, value) = input
    .split_once(':')
    .ok_or_else(|| format!("expected NAME:VALUE, got `{input}`"))?;
  let name = name.trim();
  if name.is_empty() {
    return Err(format!("empty header name in `{input}`"));
  }
  Ok((name.to_string(), value.trim().to_string()))
}

/// Connection and authentication options
#[derive(Debug, Parser)]
pub struct AuthOptions {
  /// Confluence site or REST API root
  #[arg(long, global = true, env = "CONFLUENCE_URL", value_name = "URL", value_parser = normalize_url)]
  pub url: Option<String>,

  /// Confluence user (email address on Cloud)
  #[arg(long, global = true, env = "CONFLUENCE_USER", value_name = "USER")]
  pub user: Option<String>,

  /// Confluence API token or password
  #[arg(long, global = true, env = "CONFLUENCE_TOKEN", value_name = "TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// HTTP proxy URL
  #[arg(long, global = true, env = "CONFLUENCE_PROXY", value_name = "URL")]
  pub proxy: Option<String>,
}

/// Behavior options
#[derive(Debug, Parser)]
pub struct BehaviorOptions {
  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Colorize output
  #[arg(long, global = true, value_enum, default_value = "auto", value_name = "WHEN")]
  pub color: ColorOption,
}

/// Color output options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorOption {
  Auto,
  Always,
  Never,
}

/// Performance options
#[derive(Debug, Parser)]
pub struct PerformanceOptions {
  /// Request timeout in seconds (0 disables it)
  #[arg(long, global = true, default_value = "30", value_name = "SECONDS")]
  pub timeout: u64,

  /// Connection timeout in seconds
  #[arg(long, global = true, value_name = "SECONDS")]
  pub connect_timeout: Option<u64>,
}

impl PerformanceOptions {
  pub fn request_timeout(&self) -> Option<Duration> {
    (self.timeout > 0).then(|| Duration::from_secs(self.timeout))
  }

  pub fn connect_timeout(&self) -> Option<Duration> {
    self.connect_timeout.map(Duration::from_secs)
  }
}

impl Cli {
  /// Validate arguments clap cannot check on its own.
  pub fn validate(&self) -> Result<(), String> {
    if let Command::Upload(upload) = &self.command
      && !upload.file.is_file()
    {
      return Err(format!("{} is not a readable file", upload.file.display()));
    }

    if let Some(proxy) = &self.auth.proxy {
      Url::parse(proxy).map_err(|e| format!("invalid --proxy URL: {e}"))?;
    }

    Ok(())
  }
}

/// Parse CLI arguments, initialize shared services, and dispatch to the chosen
/// command.
pub async fn run() {
  let cli = Cli::parse();

  init_tracing(&cli.behavior);

  let colors = ColorScheme::new(cli.behavior.color);

  if let Err(e) = cli.validate() {
    eprintln!("{} {}", colors.error("Error:"), e);
    std::process::exit(4);
  }

  match &cli.command {
    Command::Call(options) => handle_call_command(options, &cli, &colors).await,
    Command::Upload(options) => handle_upload_command(options, &cli, &colors).await,
    Command::Routes { group, json } => handle_routes_command(group.as_deref(), *json, &colors),
    Command::Auth { subcommand } => handle_auth_command(*subcommand, &cli, &colors).await,
    Command::Version { json, short } => handle_version_command(*json, *short, &colors),
    Command::Completions { shell } => handle_completions_command(*shell),
  }
}

fn init_tracing(behavior: &BehaviorOptions) {
  let level = if behavior.quiet {
    LevelFilter::ERROR
  } else {
    match behavior.verbose {
      0 => LevelFilter::WARN,
      1 => LevelFilter::INFO,
      2 => LevelFilter::DEBUG,
      _ => LevelFilter::TRACE,
    }
  };

  let env_filter = EnvFilter::builder()
    .with_default_directive(level.into())
    .from_env_lossy();

  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .try_init();
}

fn get_clap_styles() -> clap::builder::Styles {
  use clap::builder::styling::{AnsiColor, Effects};

  clap::builder::Styles::styled()
    .header(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .usage(AnsiColor::BrightYellow.on_default() | Effects::BOLD)
    .literal(AnsiColor::BrightGreen.on_default())
    .placeholder(AnsiColor::BrightCyan.on_default())
    .error(AnsiColor::BrightRed.on_default() | Effects::BOLD)
    .valid(AnsiColor::BrightGreen.on_default())
    .invalid(AnsiColor::BrightRed.on_default())
}

/// Body source for `call --body`: a file path or `-` for stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodySource {
  Stdin,
  File(PathBuf),
}

pub(crate) fn parse_body_source(input: &str) -> Result<BodySource, String> {
  Ok(if input == "-" {
    BodySource::Stdin
  } else {
    BodySource::File(PathBuf::from(input))
  })
}
