//! User groups (`/group`).

use serde::Serialize;
use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_GROUPS: Route = Route::get("group.get_groups", "/group");
pub const CREATE_GROUP: Route = Route::post("group.create_group", "/group");
pub const DELETE_GROUP: Route = Route::delete("group.delete_group", "/group");
pub const GET_GROUP: Route = Route::get("group.get_group", "/group/{groupName}");
pub const GET_MEMBERS: Route = Route::get("group.get_members", "/group/{groupName}/member");
pub const SEARCH_GROUPS: Route = Route::get("group.search_groups", "/group/picker");
pub const ADD_MEMBER: Route = Route::post("group.add_member", "/group/user");
pub const REMOVE_MEMBER: Route = Route::delete("group.remove_member", "/group/user");

pub const ROUTES: &[Route] = &[
  GET_GROUPS,
  CREATE_GROUP,
  DELETE_GROUP,
  GET_GROUP,
  GET_MEMBERS,
  SEARCH_GROUPS,
  ADD_MEMBER,
  REMOVE_MEMBER,
];

resource! {
  /// Group listings and membership management.
  Group
}

impl Group {
  pub async fn get_groups(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_GROUPS, RequestArgs::new().query(query)).await
  }

  /// Create a group; `body` is `{"name": ..}`.
  pub async fn create_group<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&CREATE_GROUP, args).await
  }

  /// Delete the group named `name`.
  pub async fn delete_group(&self, name: &str) -> Result<Value> {
    let args = RequestArgs::new().query(Query::new().param("name", name));
    self.context.invoke(&DELETE_GROUP, args).await
  }

  pub async fn get_group(&self, group_name: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("groupName", group_name).query(query);
    self.context.invoke(&GET_GROUP, args).await
  }

  pub async fn get_members(&self, group_name: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("groupName", group_name).query(query);
    self.context.invoke(&GET_MEMBERS, args).await
  }

  /// Search groups by partial name (`query`, `start`, `limit`).
  pub async fn search_groups(&self, query: Query) -> Result<Value> {
    self.context.invoke(&SEARCH_GROUPS, RequestArgs::new().query(query)).await
  }

  /// Add a user to the group `name`; `body` is `{"accountId": ..}`.
  pub async fn add_member<B: Serialize + ?Sized>(&self, name: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new()
      .query(Query::new().param("name", name))
      .json_body(body)?;
    self.context.invoke(&ADD_MEMBER, args).await
  }

  pub async fn remove_member(&self, name: &str, account_id: &str) -> Result<Value> {
    let args = RequestArgs::new().query(Query::new().param("name", name).param("accountId", account_id));
    self.context.invoke(&REMOVE_MEMBER, args).await
  }
}
