//! Credential provider abstraction.

use super::{Credential, CredentialError};

/// A source of credentials keyed by host name.
pub trait CredentialsProvider {
  /// Look up credentials for `host` (e.g. `example.atlassian.net`).
  ///
  /// # Returns
  /// * `Ok(Some(_))` when the provider has an entry for the host.
  /// * `Ok(None)` when it has none, so another source can be tried.
  ///
  /// # Errors
  /// Returns a [`CredentialError`] when the backing store cannot be read or
  /// parsed.
  fn get_credentials(&self, host: &str) -> Result<Option<Credential>, CredentialError>;
}
