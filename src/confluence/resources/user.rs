//! Users and watch subscriptions (`/user`).

use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_USER: Route = Route::get("user.get_user", "/user");
pub const GET_ANONYMOUS: Route = Route::get("user.get_anonymous", "/user/anonymous");
pub const GET_CURRENT: Route = Route::get("user.get_current", "/user/current");
pub const GET_GROUP_MEMBERSHIPS: Route = Route::get("user.get_group_memberships", "/user/memberof");
pub const GET_USERS_BULK: Route = Route::get("user.get_users_bulk", "/user/bulk");
pub const GET_EMAIL: Route = Route::get("user.get_email", "/user/email");
pub const GET_CONTENT_WATCH_STATUS: Route =
  Route::get("user.get_content_watch_status", "/user/watch/content/{contentId}");
pub const ADD_CONTENT_WATCHER: Route = Route::post("user.add_content_watcher", "/user/watch/content/{contentId}");
pub const REMOVE_CONTENT_WATCHER: Route =
  Route::delete("user.remove_content_watcher", "/user/watch/content/{contentId}");
pub const GET_LABEL_WATCH_STATUS: Route = Route::get("user.get_label_watch_status", "/user/watch/label/{labelName}");
pub const ADD_LABEL_WATCHER: Route = Route::post("user.add_label_watcher", "/user/watch/label/{labelName}");
pub const REMOVE_LABEL_WATCHER: Route = Route::delete("user.remove_label_watcher", "/user/watch/label/{labelName}");
pub const GET_SPACE_WATCH_STATUS: Route = Route::get("user.get_space_watch_status", "/user/watch/space/{spaceKey}");
pub const ADD_SPACE_WATCHER: Route = Route::post("user.add_space_watcher", "/user/watch/space/{spaceKey}");
pub const REMOVE_SPACE_WATCHER: Route = Route::delete("user.remove_space_watcher", "/user/watch/space/{spaceKey}");

pub const ROUTES: &[Route] = &[
  GET_USER,
  GET_ANONYMOUS,
  GET_CURRENT,
  GET_GROUP_MEMBERSHIPS,
  GET_USERS_BULK,
  GET_EMAIL,
  GET_CONTENT_WATCH_STATUS,
  ADD_CONTENT_WATCHER,
  REMOVE_CONTENT_WATCHER,
  GET_LABEL_WATCH_STATUS,
  ADD_LABEL_WATCHER,
  REMOVE_LABEL_WATCHER,
  GET_SPACE_WATCH_STATUS,
  ADD_SPACE_WATCHER,
  REMOVE_SPACE_WATCHER,
];

resource! {
  /// User lookups and watch subscriptions.
  User
}

impl User {
  /// Look up a user by `accountId` (Cloud) or `username`/`key` (Server).
  pub async fn get_user(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_USER, RequestArgs::new().query(query)).await
  }

  pub async fn get_anonymous(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_ANONYMOUS, RequestArgs::new().query(query)).await
  }

  /// The user the client is authenticated as. Handy for checking
  /// credentials.
  pub async fn get_current(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_CURRENT, RequestArgs::new().query(query)).await
  }

  pub async fn get_group_memberships(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_GROUP_MEMBERSHIPS, RequestArgs::new().query(query)).await
  }

  /// Several users at once; repeat `accountId` in `query`.
  pub async fn get_users_bulk(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_USERS_BULK, RequestArgs::new().query(query)).await
  }

  pub async fn get_email(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_EMAIL, RequestArgs::new().query(query)).await
  }

  pub async fn get_content_watch_status(&self, content_id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("contentId", content_id).query(query);
    self.context.invoke(&GET_CONTENT_WATCH_STATUS, args).await
  }

  pub async fn add_content_watcher(&self, content_id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("contentId", content_id).query(query);
    self.context.invoke(&ADD_CONTENT_WATCHER, args).await
  }

  pub async fn remove_content_watcher(&self, content_id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("contentId", content_id).query(query);
    self.context.invoke(&REMOVE_CONTENT_WATCHER, args).await
  }

  pub async fn get_label_watch_status(&self, label_name: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("labelName", label_name).query(query);
    self.context.invoke(&GET_LABEL_WATCH_STATUS, args).await
  }

  pub async fn add_label_watcher(&self, label_name: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("labelName", label_name).query(query);
    self.context.invoke(&ADD_LABEL_WATCHER, args).await
  }

  pub async fn remove_label_watcher(&self, label_name: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("labelName", label_name).query(query);
    self.context.invoke(&REMOVE_LABEL_WATCHER, args).await
  }

  pub async fn get_space_watch_status(&self, space_key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).query(query);
    self.context.invoke(&GET_SPACE_WATCH_STATUS, args).await
  }

  pub async fn add_space_watcher(&self, space_key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).query(query);
    self.context.invoke(&ADD_SPACE_WATCHER, args).await
  }

  pub async fn remove_space_watcher(&self, space_key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).query(query);
    self.context.invoke(&REMOVE_SPACE_WATCHER, args).await
  }
}
