//! Spaces, their content listings, properties and permissions (`/space`).

use serde::Serialize;
use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_SPACES: Route = Route::get("space.get_spaces", "/space");
pub const CREATE_SPACE: Route = Route::post("space.create_space", "/space");
pub const CREATE_PRIVATE_SPACE: Route = Route::post("space.create_private_space", "/space/_private");
pub const GET_SPACE: Route = Route::get("space.get_space", "/space/{spaceKey}");
pub const UPDATE_SPACE: Route = Route::put("space.update_space", "/space/{spaceKey}");
pub const DELETE_SPACE: Route = Route::delete("space.delete_space", "/space/{spaceKey}");
pub const GET_SPACE_CONTENT: Route = Route::get("space.get_space_content", "/space/{spaceKey}/content");
pub const GET_SPACE_CONTENT_BY_TYPE: Route =
  Route::get("space.get_space_content_by_type", "/space/{spaceKey}/content/{type}");
pub const GET_SPACE_PROPERTIES: Route = Route::get("space.get_space_properties", "/space/{spaceKey}/property");
pub const CREATE_SPACE_PROPERTY: Route = Route::post("space.create_space_property", "/space/{spaceKey}/property");
pub const GET_SPACE_PROPERTY: Route = Route::get("space.get_space_property", "/space/{spaceKey}/property/{key}");
pub const UPDATE_SPACE_PROPERTY: Route = Route::put("space.update_space_property", "/space/{spaceKey}/property/{key}");
pub const DELETE_SPACE_PROPERTY: Route =
  Route::delete("space.delete_space_property", "/space/{spaceKey}/property/{key}");
pub const ADD_SPACE_PERMISSION: Route = Route::post("space.add_space_permission", "/space/{spaceKey}/permission");
pub const REMOVE_SPACE_PERMISSION: Route =
  Route::delete("space.remove_space_permission", "/space/{spaceKey}/permission/{id}");

pub const ROUTES: &[Route] = &[
  GET_SPACES,
  CREATE_SPACE,
  CREATE_PRIVATE_SPACE,
  GET_SPACE,
  UPDATE_SPACE,
  DELETE_SPACE,
  GET_SPACE_CONTENT,
  GET_SPACE_CONTENT_BY_TYPE,
  GET_SPACE_PROPERTIES,
  CREATE_SPACE_PROPERTY,
  GET_SPACE_PROPERTY,
  UPDATE_SPACE_PROPERTY,
  DELETE_SPACE_PROPERTY,
  ADD_SPACE_PERMISSION,
  REMOVE_SPACE_PERMISSION,
];

resource! {
  /// Operations on spaces.
  Space
}

impl Space {
  /// List spaces. Filter with `spaceKey` (repeatable), `type`, `status`,
  /// `label` or `favourite`.
  pub async fn get_spaces(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_SPACES, RequestArgs::new().query(query)).await
  }

  /// Create a space; `body` carries `key`, `name` and optionally
  /// `description`.
  pub async fn create_space<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&CREATE_SPACE, args).await
  }

  /// Create a space visible only to its creator.
  pub async fn create_private_space<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&CREATE_PRIVATE_SPACE, args).await
  }

  pub async fn get_space(&self, space_key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).query(query);
    self.context.invoke(&GET_SPACE, args).await
  }

  pub async fn update_space<B: Serialize + ?Sized>(&self, space_key: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).json_body(body)?;
    self.context.invoke(&UPDATE_SPACE, args).await
  }

  /// Delete a space. Runs as a long task on the server.
  pub async fn delete_space(&self, space_key: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key);
    self.context.invoke(&DELETE_SPACE, args).await
  }

  /// Content in the space, grouped by type. Pass `depth=root` for top-level
  /// pages only.
  pub async fn get_space_content(&self, space_key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).query(query);
    self.context.invoke(&GET_SPACE_CONTENT, args).await
  }

  pub async fn get_space_content_by_type(&self, space_key: &str, content_type: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("spaceKey", space_key)
      .path_param("type", content_type)
      .query(query);
    self.context.invoke(&GET_SPACE_CONTENT_BY_TYPE, args).await
  }

  pub async fn get_space_properties(&self, space_key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).query(query);
    self.context.invoke(&GET_SPACE_PROPERTIES, args).await
  }

  pub async fn create_space_property<B: Serialize + ?Sized>(&self, space_key: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).json_body(body)?;
    self.context.invoke(&CREATE_SPACE_PROPERTY, args).await
  }

  pub async fn get_space_property(&self, space_key: &str, key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("spaceKey", space_key)
      .path_param("key", key)
      .query(query);
    self.context.invoke(&GET_SPACE_PROPERTY, args).await
  }

  pub async fn update_space_property<B: Serialize + ?Sized>(&self, space_key: &str, key: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("spaceKey", space_key)
      .path_param("key", key)
      .json_body(body)?;
    self.context.invoke(&UPDATE_SPACE_PROPERTY, args).await
  }

  pub async fn delete_space_property(&self, space_key: &str, key: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).path_param("key", key);
    self.context.invoke(&DELETE_SPACE_PROPERTY, args).await
  }

  /// Grant a permission; `body` names the subject and the
  /// `operation` (`{key, target}`).
  pub async fn add_space_permission<B: Serialize + ?Sized>(&self, space_key: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).json_body(body)?;
    self.context.invoke(&ADD_SPACE_PERMISSION, args).await
  }

  pub async fn remove_space_permission(&self, space_key: &str, permission_id: &str) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("spaceKey", space_key)
      .path_param("id", permission_id);
    self.context.invoke(&REMOVE_SPACE_PERMISSION, args).await
  }
}
