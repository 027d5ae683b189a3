//! Credential values and the errors raised while looking them up.

use std::path::PathBuf;

use thiserror::Error;

/// Basic-auth credentials for one Confluence host.
///
/// On Atlassian Cloud `username` is the account email and `password` an API
/// token; Server/Data Center accepts a username and password or a personal
/// access token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
  pub username: String,
  pub password: String,
}

impl std::fmt::Debug for Credential {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credential")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .finish()
  }
}

/// Where a credential value was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
  /// `--user`/`--token` or the matching environment variables.
  Explicit,
  Netrc,
}

impl std::fmt::Display for CredentialSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Explicit => f.write_str("command line / environment"),
      Self::Netrc => f.write_str(".netrc file"),
    }
  }
}

/// Errors raised by credential providers.
#[derive(Debug, Error)]
pub enum CredentialError {
  /// No home directory to look for `.netrc` in.
  #[error("cannot locate .netrc: HOME is not set")]
  NoHome,

  /// The file exists but is not valid netrc syntax.
  #[error("failed to parse {}: {message}", path.display())]
  Parse { path: PathBuf, message: String },

  #[error("failed to read {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
