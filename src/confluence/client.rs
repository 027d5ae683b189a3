//! Client facade for the Confluence REST API.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::config::{ClientConfig, Mimetypes, ValidatedConfig};
use super::error::{ApiError, Result};
use super::request::{PreparedRequest, RequestArgs, prepare};
use super::resources::{Audit, Content, Group, LongTask, Relation, Search, Settings, Space, Template, User};
use super::response::normalize;
use super::route::{Route, find_route};
use super::transport::{ReqwestTransport, Transport};

/// State shared by every resource: the validated configuration and one
/// transport (and therefore one connection pool).
pub struct ClientContext {
  config: ValidatedConfig,
  transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ClientContext {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ClientContext").field("config", &self.config).finish_non_exhaustive()
  }
}

impl ClientContext {
  pub fn config(&self) -> &ValidatedConfig {
    &self.config
  }

  /// Resolve `route` with `args` into the request that would be sent.
  ///
  /// # Errors
  /// See [`prepare`].
  pub fn prepare(&self, route: &Route, args: RequestArgs) -> Result<PreparedRequest> {
    prepare(&self.config.base_url, route, args)
  }

  /// Prepare, send and normalize one call.
  ///
  /// # Errors
  /// Local errors are returned before any I/O; otherwise the normalized
  /// transport or remote failure.
  pub async fn invoke(&self, route: &Route, args: RequestArgs) -> Result<Value> {
    let request = self.prepare(route, args)?;
    let outcome = self.transport.send(request, &self.config.credentials).await;
    let result = normalize(outcome, &self.config.mimetypes);

    if let Err(err) = &result {
      debug!("{} failed: {err}", route.name);
    }
    result
  }
}

/// Confluence API client.
///
/// Each resource group is exposed as a public field; all of them share the
/// same [`ClientContext`]. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct ConfluenceClient {
  context: Arc<ClientContext>,
  pub content: Content,
  pub space: Space,
  pub user: User,
  pub group: Group,
  pub search: Search,
  pub settings: Settings,
  pub template: Template,
  pub relation: Relation,
  pub audit: Audit,
  pub long_task: LongTask,
}

/// Build a client from an optional configuration.
///
/// # Errors
/// Returns [`ApiError::Configuration`] when `config` is `None` or invalid.
pub fn create_client(config: Option<ClientConfig>) -> Result<ConfluenceClient> {
  let config = config.ok_or_else(|| ApiError::Configuration("config is required".to_string()))?;
  ConfluenceClient::new(config)
}

impl ConfluenceClient {
  /// Create a client that talks to the network through reqwest.
  ///
  /// # Errors
  /// Returns [`ApiError::Configuration`] when required fields are missing or
  /// the HTTP client cannot be built.
  pub fn new(config: ClientConfig) -> Result<Self> {
    let config = config.validate()?;
    let transport = ReqwestTransport::new(&config.transport, config.proxy.as_ref())?;
    Ok(Self::from_parts(config, Arc::new(transport)))
  }

  /// Create a client with a caller-provided transport.
  ///
  /// # Errors
  /// Returns [`ApiError::Configuration`] when required fields are missing.
  pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
    Ok(Self::from_parts(config.validate()?, transport))
  }

  fn from_parts(config: ValidatedConfig, transport: Arc<dyn Transport>) -> Self {
    let context = Arc::new(ClientContext { config, transport });

    Self {
      content: Content::new(Arc::clone(&context)),
      space: Space::new(Arc::clone(&context)),
      user: User::new(Arc::clone(&context)),
      group: Group::new(Arc::clone(&context)),
      search: Search::new(Arc::clone(&context)),
      settings: Settings::new(Arc::clone(&context)),
      template: Template::new(Arc::clone(&context)),
      relation: Relation::new(Arc::clone(&context)),
      audit: Audit::new(Arc::clone(&context)),
      long_task: LongTask::new(Arc::clone(&context)),
      context,
    }
  }

  pub fn base_url(&self) -> &Url {
    &self.context.config.base_url
  }

  pub fn user_name(&self) -> &str {
    &self.context.config.credentials.user
  }

  pub fn mimetypes(&self) -> &Mimetypes {
    &self.context.config.mimetypes
  }

  pub fn context(&self) -> &ClientContext {
    &self.context
  }

  /// Invoke any declared route by its `<group>.<operation>` name.
  ///
  /// # Errors
  /// Returns [`ApiError::InvalidRequest`] for an unknown route name, otherwise
  /// whatever the call itself produces.
  pub async fn call(&self, route_name: &str, args: RequestArgs) -> Result<Value> {
    let route = lookup(route_name)?;
    self.context.invoke(route, args).await
  }

  /// Resolve a named route without sending it.
  ///
  /// # Errors
  /// Same local errors as [`ConfluenceClient::call`].
  pub fn prepare(&self, route_name: &str, args: RequestArgs) -> Result<PreparedRequest> {
    let route = lookup(route_name)?;
    self.context.prepare(route, args)
  }
}

fn lookup(route_name: &str) -> Result<&'static Route> {
  find_route(route_name).ok_or_else(|| ApiError::InvalidRequest(format!("unknown route `{route_name}`")))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn create_client_requires_config() {
    let err = create_client(None).unwrap_err();
    assert_eq!(err.message(), "config is required");
  }

  #[test]
  fn new_client_trims_trailing_slash() {
    let client = ConfluenceClient::new(ClientConfig::new("https://example.atlassian.net/wiki/rest/api/", "u", "t")).unwrap();
    assert_eq!(client.base_url().as_str(), "https://example.atlassian.net/wiki/rest/api");
    assert_eq!(client.user_name(), "u");
  }

  #[test]
  fn prepare_by_name_rejects_unknown_routes() {
    let client = create_client(Some(ClientConfig::new("https://x/wiki/rest/api", "a", "b"))).unwrap();
    let err = client.prepare("content.explode", RequestArgs::new()).unwrap_err();
    assert!(err.message().contains("content.explode"));
  }

  #[test]
  fn clones_share_context() {
    let client = create_client(Some(ClientConfig::new("https://x/wiki/rest/api", "a", "b"))).unwrap();
    let clone = client.clone();
    assert!(std::ptr::eq(client.context(), clone.context()));
  }
}
