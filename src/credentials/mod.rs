//! Credential discovery for the `confluence-rest` CLI.
//!
//! The library itself only takes a user and password in
//! [`ClientConfig`](crate::confluence::ClientConfig). The CLI resolves them
//! from flags, environment variables or `~/.netrc`:
//!
//! ```text
//! machine your-instance.atlassian.net
//!   login your.email@example.com
//!   password your-api-token-here
//! ```

mod netrc;
mod provider;
mod types;

pub use netrc::NetrcProvider;
pub use provider::CredentialsProvider;
pub use types::{Credential, CredentialError, CredentialSource};
