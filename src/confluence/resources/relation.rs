//! Relationships between users, content and spaces (`/relation`).
//!
//! A relationship is a named edge such as `favourite` from a source entity to
//! a target entity. Entities are addressed by type (`user`, `content`,
//! `space`) and key.

use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

const EDGE: &str = "/relation/{relationName}/from/{sourceType}/{sourceKey}/to/{targetType}/{targetKey}";

pub const GET_RELATIONSHIP: Route = Route::get("relation.get_relationship", EDGE);
pub const CREATE_RELATIONSHIP: Route = Route::put("relation.create_relationship", EDGE);
pub const DELETE_RELATIONSHIP: Route = Route::delete("relation.delete_relationship", EDGE);
pub const FIND_TARGETS: Route = Route::get(
  "relation.find_targets",
  "/relation/{relationName}/from/{sourceType}/{sourceKey}/to/{targetType}",
);
pub const FIND_SOURCES: Route = Route::get(
  "relation.find_sources",
  "/relation/{relationName}/to/{targetType}/{targetKey}/from/{sourceType}",
);

pub const ROUTES: &[Route] = &[
  GET_RELATIONSHIP,
  CREATE_RELATIONSHIP,
  DELETE_RELATIONSHIP,
  FIND_TARGETS,
  FIND_SOURCES,
];

/// One end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity<'a> {
  /// `user`, `content` or `space`.
  pub kind: &'a str,
  /// Account id, content id or space key. `current` names the calling user.
  pub key: &'a str,
}

impl<'a> Entity<'a> {
  pub fn new(kind: &'a str, key: &'a str) -> Self {
    Self { kind, key }
  }
}

resource! {
  /// Relationship lookups and edits.
  Relation
}

impl Relation {
  pub async fn get_relationship(&self, name: &str, source: Entity<'_>, target: Entity<'_>, query: Query) -> Result<Value> {
    self.context.invoke(&GET_RELATIONSHIP, edge_args(name, source, target).query(query)).await
  }

  pub async fn create_relationship(&self, name: &str, source: Entity<'_>, target: Entity<'_>, query: Query) -> Result<Value> {
    self.context.invoke(&CREATE_RELATIONSHIP, edge_args(name, source, target).query(query)).await
  }

  pub async fn delete_relationship(&self, name: &str, source: Entity<'_>, target: Entity<'_>, query: Query) -> Result<Value> {
    self.context.invoke(&DELETE_RELATIONSHIP, edge_args(name, source, target).query(query)).await
  }

  /// Every target of type `target_type` related to `source`.
  pub async fn find_targets(&self, name: &str, source: Entity<'_>, target_type: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("relationName", name)
      .path_param("sourceType", source.kind)
      .path_param("sourceKey", source.key)
      .path_param("targetType", target_type)
      .query(query);
    self.context.invoke(&FIND_TARGETS, args).await
  }

  /// Every source of type `source_type` related to `target`.
  pub async fn find_sources(&self, name: &str, target: Entity<'_>, source_type: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("relationName", name)
      .path_param("targetType", target.kind)
      .path_param("targetKey", target.key)
      .path_param("sourceType", source_type)
      .query(query);
    self.context.invoke(&FIND_SOURCES, args).await
  }
}

fn edge_args(name: &str, source: Entity<'_>, target: Entity<'_>) -> RequestArgs {
  RequestArgs::new()
    .path_param("relationName", name)
    .path_param("sourceType", source.kind)
    .path_param("sourceKey", source.key)
    .path_param("targetType", target.kind)
    .path_param("targetKey", target.key)
}
