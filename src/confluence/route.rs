//! Declarative route descriptors.
//!
//! Every operation in [`resources`](super::resources) is backed by a `const`
//! [`Route`]. The per-group tables are static, so the full API surface can be
//! listed or searched without constructing a client.

use std::fmt;

use serde::Serialize;

use super::resources;

/// HTTP verbs used by the Confluence REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
  Get,
  Post,
  Put,
  Delete,
}

impl HttpMethod {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Get => "GET",
      Self::Post => "POST",
      Self::Put => "PUT",
      Self::Delete => "DELETE",
    }
  }
}

impl fmt::Display for HttpMethod {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<HttpMethod> for reqwest::Method {
  fn from(method: HttpMethod) -> Self {
    match method {
      HttpMethod::Get => reqwest::Method::GET,
      HttpMethod::Post => reqwest::Method::POST,
      HttpMethod::Put => reqwest::Method::PUT,
      HttpMethod::Delete => reqwest::Method::DELETE,
    }
  }
}

/// A single API operation: its name, verb and path template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
  /// `<group>.<operation>`, e.g. `content.get_content_by_id`.
  pub name: &'static str,
  pub method: HttpMethod,
  /// Path template relative to the base URL.
  pub path: &'static str,
  /// Whether the operation uploads a multipart form instead of JSON.
  pub multipart: bool,
}

impl Route {
  pub const fn get(name: &'static str, path: &'static str) -> Self {
    Self::new(name, HttpMethod::Get, path)
  }

  pub const fn post(name: &'static str, path: &'static str) -> Self {
    Self::new(name, HttpMethod::Post, path)
  }

  pub const fn put(name: &'static str, path: &'static str) -> Self {
    Self::new(name, HttpMethod::Put, path)
  }

  pub const fn delete(name: &'static str, path: &'static str) -> Self {
    Self::new(name, HttpMethod::Delete, path)
  }

  /// A `POST` that carries a multipart form (attachment uploads).
  pub const fn multipart(name: &'static str, path: &'static str) -> Self {
    Self {
      name,
      method: HttpMethod::Post,
      path,
      multipart: true,
    }
  }

  const fn new(name: &'static str, method: HttpMethod, path: &'static str) -> Self {
    Self {
      name,
      method,
      path,
      multipart: false,
    }
  }

  /// Resource group prefix of the route name.
  pub fn group(&self) -> &'static str {
    self.name.split_once('.').map_or(self.name, |(group, _)| group)
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {} {}", self.name, self.method, self.path)
  }
}

/// Route tables of every resource group, in catalog order.
pub const ROUTE_TABLES: &[&[Route]] = &[
  resources::content::ROUTES,
  resources::space::ROUTES,
  resources::user::ROUTES,
  resources::group::ROUTES,
  resources::search::ROUTES,
  resources::settings::ROUTES,
  resources::template::ROUTES,
  resources::relation::ROUTES,
  resources::audit::ROUTES,
  resources::long_task::ROUTES,
];

/// Iterate every declared route.
pub fn all_routes() -> impl Iterator<Item = &'static Route> {
  ROUTE_TABLES.iter().flat_map(|table| table.iter())
}

/// Look up a route by its `<group>.<operation>` name.
pub fn find_route(name: &str) -> Option<&'static Route> {
  all_routes().find(|route| route.name == name)
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;
  use crate::confluence::path::placeholders;

  #[test]
  fn route_names_are_unique() {
    let mut seen = HashSet::new();
    for route in all_routes() {
      assert!(seen.insert(route.name), "duplicate route name {}", route.name);
    }
  }

  #[test]
  fn verb_and_path_pairs_are_unique() {
    let mut seen = HashSet::new();
    for route in all_routes() {
      assert!(
        seen.insert((route.method, route.path)),
        "{} duplicates {} {}",
        route.name,
        route.method,
        route.path
      );
    }
  }

  #[test]
  fn templates_are_well_formed() {
    for route in all_routes() {
      assert!(route.path.starts_with('/'), "{route}");
      assert_eq!(route.path.matches('{').count(), route.path.matches('}').count(), "{route}");
      for name in placeholders(route.path) {
        assert!(!name.is_empty(), "{route}");
      }
    }
  }

  #[test]
  fn every_group_is_prefixed_consistently() {
    let groups: HashSet<_> = all_routes().map(Route::group).collect();
    let expected: HashSet<_> = [
      "content",
      "space",
      "user",
      "group",
      "search",
      "settings",
      "template",
      "relation",
      "audit",
      "long_task",
    ]
    .into_iter()
    .collect();
    assert_eq!(groups, expected);
  }

  #[test]
  fn only_attachment_uploads_are_multipart() {
    let multipart: Vec<_> = all_routes().filter(|route| route.multipart).map(|r| r.name).collect();
    assert_eq!(
      multipart,
      vec!["content.create_attachment", "content.update_attachment_data"]
    );
  }

  #[test]
  fn find_route_by_name() {
    let route = find_route("content.get_contents").unwrap();
    assert_eq!(route.method, HttpMethod::Get);
    assert_eq!(route.path, "/content");
    assert!(find_route("content.nope").is_none());
  }

  #[test]
  fn route_display() {
    let route = find_route("long_task.get_task").unwrap();
    insta::assert_snapshot!(route.to_string(), @"long_task.get_task GET /longtask/{id}");
  }
}
