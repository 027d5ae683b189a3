//! Authentication subcommand handlers.
//!
//! `confluence-rest auth test` fetches the current user with the resolved
//! credentials; `confluence-rest auth show` prints where the URL and
//! credentials came from without calling the API.

use std::process;

use anyhow::Context;
use url::Url;

use super::connect;
use crate::cli::{AuthCommand, Cli};
use crate::color::ColorScheme;
use crate::confluence::models::User;
use crate::confluence::{ApiError, Query, from_data};
use crate::credentials::{Credential, CredentialSource, CredentialsProvider, NetrcProvider};

const API_TOKEN_URL: &str = "https://id.atlassian.com/manage-profile/security/api-tokens";

pub(crate) async fn handle_auth_command(subcommand: AuthCommand, cli: &Cli, colors: &ColorScheme) {
  match subcommand {
    AuthCommand::Test => test_auth(cli, colors).await,
    AuthCommand::Show => show_auth_config(cli, colors),
  }
}

async fn test_auth(cli: &Cli, colors: &ColorScheme) {
  let client = connect(cli, colors);

  println!("{} {}", colors.info("→"), colors.info("Testing authentication"));
  println!("  {}: {}", colors.emphasis("URL"), colors.link(client.base_url()));
  println!("  {}: {}", colors.emphasis("Username"), client.user_name());

  let user = client
    .user
    .get_current(Query::new())
    .await
    .and_then(from_data::<User>);

  match user {
    Ok(user) => {
      println!(
        "\n{} {}",
        colors.success("✓"),
        colors.success("Authentication successful!")
      );
      println!("\n{}", colors.emphasis("User Information:"));
      println!("  {}: {}", colors.emphasis("Display Name"), user.display_name);
      if let Some(id) = user.identifier() {
        println!("  {}: {}", colors.emphasis("Identifier"), colors.dimmed(id));
      }
      if let Some(email) = &user.email {
        println!("  {}: {}", colors.emphasis("Email"), email);
      }
      if let Some(public_name) = &user.public_name {
        println!("  {}: {}", colors.emphasis("Public Name"), public_name);
      }
    }
    Err(e) => {
      eprintln!("\n{} {}", colors.error("✗"), colors.error("Authentication failed"));
      eprintln!("  {e}");
      eprintln!("\n{}", colors.info("Common issues:"));
      for hint in failure_hints(&e) {
        eprintln!("  • {hint}");
      }
      eprintln!(
        "\n{}",
        colors.dimmed("Run 'confluence-rest auth show' to see your current configuration")
      );
      process::exit(2);
    }
  }
}

/// Suggestions keyed on how the call failed.
fn failure_hints(error: &ApiError) -> Vec<String> {
  match error.status_code() {
    Some(401) => vec![
      format!("Invalid API token or password; create a token at {API_TOKEN_URL}"),
      "On Atlassian Cloud the username is your email address".to_string(),
    ],
    Some(403) => vec!["The account is not allowed to use the REST API".to_string()],
    Some(404) => vec!["Wrong base URL; it should end in /wiki/rest/api on Cloud".to_string()],
    Some(status) if (300..400).contains(&status) => {
      vec!["The server redirected; check the scheme and host of the base URL".to_string()]
    }
    _ => vec!["Network connectivity or proxy issues".to_string()],
  }
}

/// Display the currently configured URL and credential sources.
fn show_auth_config(cli: &Cli, colors: &ColorScheme) {
  println!("{}\n", colors.emphasis("Authentication Configuration"));

  let url = cli.auth.url.as_deref();
  match url {
    Some(value) => {
      println!("{}: {}", colors.emphasis("Base URL"), colors.link(value));
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(env_or_flag("CONFLUENCE_URL")));
    }
    None => println!("{}: {}", colors.emphasis("Base URL"), colors.dimmed("(not set)")),
  }

  if let Some(proxy) = &cli.auth.proxy {
    println!("{}: {}", colors.emphasis("Proxy"), colors.link(proxy));
  }

  let resolved = url.map(|url| load_credentials(url, cli));
  match &resolved {
    Some(Ok((credential, source))) => {
      println!("\n{}: {}", colors.emphasis("Username"), credential.username);
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(describe_source(*source, "CONFLUENCE_USER")));
      println!(
        "\n{}: {}",
        colors.emphasis("API Token"),
        colors.dimmed(mask_secret(&credential.password))
      );
      println!(
        "  {}: {} characters",
        colors.dimmed("Length"),
        colors.number(credential.password.len())
      );
      println!("  {}: {}", colors.dimmed("Source"), colors.dimmed(describe_source(*source, "CONFLUENCE_TOKEN")));
      println!("\n{} {}", colors.success("✓"), colors.success("Credentials configured"));
    }
    Some(Err(e)) => {
      println!("\n{} {}", colors.warning("⚠"), colors.warning("Credentials incomplete"));
      println!("  {e:#}");
      print_setup_help(url);
    }
    None => {
      println!(
        "\n{} {} is required for API access",
        colors.warning("⚠"),
        colors.emphasis("Base URL")
      );
      println!("  Set via --url flag or CONFLUENCE_URL environment variable");
    }
  }
}

fn print_setup_help(url: Option<&str>) {
  println!("\n  Provide credentials via:");
  println!("    • --user and --token");
  println!("    • CONFLUENCE_USER and CONFLUENCE_TOKEN");
  println!("    • ~/.netrc:");
  if let Some(host) = url.and_then(extract_host) {
    println!("        machine {host}");
  }
  println!("          login your.email@example.com");
  println!("          password your-api-token");
  println!("\n  API tokens: {API_TOKEN_URL}");
}

fn env_or_flag(var: &str) -> &'static str {
  if std::env::var_os(var).is_some() {
    "environment variable"
  } else {
    "command-line flag"
  }
}

fn describe_source(source: CredentialSource, var: &str) -> String {
  match source {
    CredentialSource::Explicit => env_or_flag(var).to_string(),
    CredentialSource::Netrc => source.to_string(),
  }
}

/// Keep the first four characters of long secrets, hide the rest.
fn mask_secret(secret: &str) -> String {
  let len = secret.chars().count();
  if len > 8 {
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}{}", "*".repeat(len - 4))
  } else {
    "*".repeat(len)
  }
}

/// Resolve credentials from flags/environment, falling back to `.netrc`.
///
/// A value given explicitly wins over the `.netrc` entry, so `--user` can be
/// combined with a token stored in `.netrc`.
///
/// # Errors
/// Fails when the URL has no host, `.netrc` cannot be parsed, or no source
/// provides both a user and a token.
pub(crate) fn load_credentials(base_url: &str, cli: &Cli) -> anyhow::Result<(Credential, CredentialSource)> {
  load_credentials_with(base_url, cli.auth.user.clone(), cli.auth.token.clone(), &NetrcProvider::new())
}

fn load_credentials_with(
  base_url: &str,
  user: Option<String>,
  token: Option<String>,
  provider: &dyn CredentialsProvider,
) -> anyhow::Result<(Credential, CredentialSource)> {
  if let (Some(username), Some(password)) = (&user, &token) {
    return Ok((
      Credential {
        username: username.clone(),
        password: password.clone(),
      },
      CredentialSource::Explicit,
    ));
  }

  let host = extract_host(base_url).with_context(|| format!("invalid base URL `{base_url}`"))?;
  if let Some(found) = provider.get_credentials(&host)? {
    return Ok((
      Credential {
        username: user.unwrap_or(found.username),
        password: token.unwrap_or(found.password),
      },
      CredentialSource::Netrc,
    ));
  }

  anyhow::bail!(
    "Credentials not found. Provide --user and --token, set CONFLUENCE_USER and CONFLUENCE_TOKEN, or add {host} to ~/.netrc"
  )
}

fn extract_host(url: &str) -> Option<String> {
  Url::parse(url).ok()?.host_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn netrc(content: &str) -> (tempfile::NamedTempFile, NetrcProvider) {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    let provider = NetrcProvider::with_path(file.path());
    (file, provider)
  }

  const URL: &str = "https://example.atlassian.net/wiki/rest/api";

  #[test]
  fn explicit_credentials_skip_netrc() {
    let (_file, provider) = netrc("machine");
    let (cred, source) =
      load_credentials_with(URL, Some("me".into()), Some("tok".into()), &provider).unwrap();
    assert_eq!(cred.username, "me");
    assert_eq!(source, CredentialSource::Explicit);
  }

  #[test]
  fn netrc_fills_missing_values() {
    let (_file, provider) = netrc("machine example.atlassian.net login n@x.com password ntok");

    let (cred, source) = load_credentials_with(URL, None, None, &provider).unwrap();
    assert_eq!(cred.username, "n@x.com");
    assert_eq!(cred.password, "ntok");
    assert_eq!(source, CredentialSource::Netrc);

    let (cred, _) = load_credentials_with(URL, Some("override".into()), None, &provider).unwrap();
    assert_eq!(cred.username, "override");
    assert_eq!(cred.password, "ntok");
  }

  #[test]
  fn missing_credentials_name_the_host() {
    let (_file, provider) = netrc("machine other.host login a password b");
    let err = load_credentials_with(URL, None, None, &provider).unwrap_err();
    assert!(err.to_string().contains("example.atlassian.net"));
  }

  #[test]
  fn host_is_taken_from_url() {
    assert_eq!(extract_host(URL).as_deref(), Some("example.atlassian.net"));
    assert_eq!(extract_host("http://localhost:8090/rest/api").as_deref(), Some("localhost"));
    assert_eq!(extract_host("not a url"), None);
  }

  #[test]
  fn secrets_are_masked() {
    assert_eq!(mask_secret("abcdefghijkl"), "abcd********");
    assert_eq!(mask_secret("short"), "*****");
  }

  #[test]
  fn hints_follow_status() {
    let unauthorized = ApiError::Remote {
      status: 401,
      message: "Unauthorized".to_string(),
      body: None,
    };
    assert!(failure_hints(&unauthorized)[0].contains("API token"));

    let redirect = ApiError::Remote {
      status: 302,
      message: "Found".to_string(),
      body: None,
    };
    assert!(failure_hints(&redirect)[0].contains("redirected"));
  }
}
