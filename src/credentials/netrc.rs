//! `.netrc` lookup.
//!
//! The file is read as a stream of whitespace-separated tokens, so entries
//! may span lines or share one. `macdef` bodies are skipped up to the next
//! blank line. A `default` entry matches any host but only after every
//! `machine` entry has been checked.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Credential, CredentialError, CredentialsProvider};

/// Reads credentials from a netrc file.
///
/// The path is `$NETRC` when set, otherwise `$HOME/.netrc`.
#[derive(Debug, Default, Clone)]
pub struct NetrcProvider {
  path: Option<PathBuf>,
}

impl NetrcProvider {
  pub fn new() -> Self {
    Self { path: None }
  }

  /// Use an explicit file instead of the default location.
  pub fn with_path(path: impl Into<PathBuf>) -> Self {
    Self {
      path: Some(path.into()),
    }
  }

  fn resolve_path(&self) -> Result<PathBuf, CredentialError> {
    if let Some(path) = &self.path {
      return Ok(path.clone());
    }
    if let Some(path) = std::env::var_os("NETRC") {
      return Ok(PathBuf::from(path));
    }
    let home = std::env::var_os("HOME").ok_or(CredentialError::NoHome)?;
    Ok(Path::new(&home).join(".netrc"))
  }
}

impl CredentialsProvider for NetrcProvider {
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError> {
    let path = self.resolve_path()?;
    if !path.exists() {
      debug!("No netrc file at {}", path.display());
      return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|source| CredentialError::Io {
      path: path.clone(),
      source,
    })?;

    parse_netrc(&content, host).map_err(|message| CredentialError::Parse { path, message })
  }
}

#[derive(Default)]
struct Entry {
  login: Option<String>,
  password: Option<String>,
}

impl Entry {
  fn into_credential(self) -> Option<Credential> {
    Some(Credential {
      username: self.login?,
      password: self.password?,
    })
  }
}

/// Find the entry for `host`, falling back to `default`.
fn parse_netrc(content: &str, host: &str) -> Result<Option<Credential>, String> {
  let mut tokens = tokenize(content).into_iter();
  let mut matched: Option<Entry> = None;
  let mut fallback: Option<Entry> = None;
  // Which entry the current `login`/`password` tokens belong to.
  let mut current: Option<Target> = None;

  while let Some(token) = tokens.next() {
    match token.as_str() {
      "machine" => {
        let name = tokens.next().ok_or("`machine` without a host name")?;
        current = if name.eq_ignore_ascii_case(host) && matched.is_none() {
          matched = Some(Entry::default());
          Some(Target::Matched)
        } else {
          Some(Target::Ignored)
        };
      }
      "default" => {
        fallback = Some(Entry::default());
        current = Some(Target::Default);
      }
      "login" | "password" | "account" => {
        let value = tokens.next().ok_or_else(|| format!("`{token}` without a value"))?;
        let entry = match current {
          Some(Target::Matched) => matched.as_mut(),
          Some(Target::Default) => fallback.as_mut(),
          Some(Target::Ignored) => None,
          None => return Err(format!("`{token}` before any `machine` or `default`")),
        };
        if let Some(entry) = entry {
          match token.as_str() {
            "login" => entry.login = Some(value),
            "password" => entry.password = Some(value),
            _ => {}
          }
        }
      }
      "macdef" => {
        tokens.next();
        // Macro bodies were collapsed into one token by the tokenizer.
        tokens.next();
      }
      other => return Err(format!("unexpected token `{other}`")),
    }
  }

  Ok(matched.and_then(Entry::into_credential).or_else(|| fallback.and_then(Entry::into_credential)))
}

#[derive(Clone, Copy)]
enum Target {
  Matched,
  Default,
  Ignored,
}

/// Split into tokens, dropping `#` comments. A `macdef` body (everything up
/// to the next blank line) becomes a single token.
fn tokenize(content: &str) -> Vec<String> {
  let mut tokens = Vec::new();
  let mut lines = content.lines();

  while let Some(line) = lines.next() {
    let line = line.split_once('#').map_or(line, |(before, _)| before);
    let mut words = line.split_whitespace();

    while let Some(word) = words.next() {
      tokens.push(word.to_string());
      if word == "macdef" {
        if let Some(name) = words.next() {
          tokens.push(name.to_string());
        }
        let body: Vec<&str> = lines.by_ref().take_while(|l| !l.trim().is_empty()).collect();
        tokens.push(body.join("\n"));
        break;
      }
    }
  }

  tokens
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  fn lookup(content: &str, host: &str) -> Option<Credential> {
    parse_netrc(content, host).unwrap()
  }

  #[test]
  fn finds_matching_machine() {
    let content = "
machine example.com
  login user1
  password pass1

machine other.com
  login user2
  password pass2
";
    let cred = lookup(content, "other.com").unwrap();
    assert_eq!(cred.username, "user2");
    assert_eq!(cred.password, "pass2");
  }

  #[test]
  fn single_line_entries() {
    let content = "machine a.com login ua password pa machine b.com login ub password pb";
    assert_eq!(lookup(content, "b.com").unwrap().username, "ub");
  }

  #[test]
  fn host_match_is_case_insensitive() {
    let content = "machine Example.Atlassian.NET login u password p";
    assert!(lookup(content, "example.atlassian.net").is_some());
  }

  #[test]
  fn default_applies_only_when_no_machine_matches() {
    let content = "
default login fallback password fallback-pass
machine example.com login specific password specific-pass
";
    assert_eq!(lookup(content, "example.com").unwrap().username, "specific");
    assert_eq!(lookup(content, "elsewhere.com").unwrap().username, "fallback");
  }

  #[test]
  fn missing_host_yields_none() {
    let content = "machine example.com login u password p";
    assert!(lookup(content, "nothere.com").is_none());
  }

  #[test]
  fn incomplete_entry_yields_none() {
    let content = "machine example.com login u";
    assert!(lookup(content, "example.com").is_none());
  }

  #[test]
  fn comments_and_blank_files() {
    assert!(lookup("", "example.com").is_none());
    assert!(lookup("  \n\t\n", "example.com").is_none());

    let content = "
# work account
machine example.com # primary
  login u  # email
  password p
";
    assert_eq!(lookup(content, "example.com").unwrap().password, "p");
  }

  #[test]
  fn macdef_bodies_are_skipped() {
    let content = "
macdef init
cd /pub
binary

machine example.com login u password p
";
    assert_eq!(lookup(content, "example.com").unwrap().username, "u");
  }

  #[test]
  fn account_token_is_accepted() {
    let content = "machine example.com login u account acct password p";
    assert_eq!(lookup(content, "example.com").unwrap().password, "p");
  }

  #[test]
  fn garbage_is_a_parse_error() {
    assert!(parse_netrc("machine", "example.com").is_err());
    assert!(parse_netrc("login u", "example.com").is_err());
    assert!(parse_netrc("machine a.com frobnicate", "a.com").is_err());
  }

  #[test]
  fn provider_reads_explicit_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "machine wiki.example.com login jane password s3cret").unwrap();

    let provider = NetrcProvider::with_path(file.path());
    let cred = provider.get_credentials("wiki.example.com").unwrap().unwrap();
    assert_eq!(cred.username, "jane");
    assert!(provider.get_credentials("other.example.com").unwrap().is_none());
  }

  #[test]
  fn provider_reports_parse_errors_with_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "machine").unwrap();

    let err = NetrcProvider::with_path(file.path()).get_credentials("x").unwrap_err();
    assert!(matches!(err, CredentialError::Parse { .. }));
  }

  #[test]
  fn provider_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = NetrcProvider::with_path(dir.path().join("absent"));
    assert!(provider.get_credentials("x").unwrap().is_none());
  }

  #[test]
  fn credential_debug_hides_password() {
    let cred = Credential {
      username: "u".to_string(),
      password: "hunter2".to_string(),
    };
    assert!(!format!("{cred:?}").contains("hunter2"));
  }
}
