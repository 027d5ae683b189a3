//! Pages, blog posts, comments and attachments (`/content`).
//!
//! Content identifiers are numeric strings. Most read operations accept an
//! `expand` query parameter (e.g. `body.storage,version,space`) to inline
//! related objects.

use serde::Serialize;
use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Multipart, Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_CONTENTS: Route = Route::get("content.get_contents", "/content");
pub const CREATE_CONTENT: Route = Route::post("content.create_content", "/content");
pub const GET_CONTENT_BY_ID: Route = Route::get("content.get_content_by_id", "/content/{id}");
pub const UPDATE_CONTENT: Route = Route::put("content.update_content", "/content/{id}");
pub const DELETE_CONTENT: Route = Route::delete("content.delete_content", "/content/{id}");
pub const GET_HISTORY: Route = Route::get("content.get_history", "/content/{id}/history");
pub const GET_MACRO_BODY: Route = Route::get(
  "content.get_macro_body",
  "/content/{id}/history/{version}/macro/id/{macroId}",
);
pub const SEARCH_CONTENT: Route = Route::get("content.search_content", "/content/search");
pub const GET_CHILDREN: Route = Route::get("content.get_children", "/content/{id}/child");
pub const GET_CHILDREN_BY_TYPE: Route = Route::get("content.get_children_by_type", "/content/{id}/child/{type}");
pub const GET_COMMENTS: Route = Route::get("content.get_comments", "/content/{id}/child/comment");
pub const GET_ATTACHMENTS: Route = Route::get("content.get_attachments", "/content/{id}/child/attachment");
pub const CREATE_ATTACHMENT: Route = Route::multipart("content.create_attachment", "/content/{id}/child/attachment");
pub const UPDATE_ATTACHMENT_PROPERTIES: Route = Route::put(
  "content.update_attachment_properties",
  "/content/{id}/child/attachment/{attachmentId}",
);
pub const UPDATE_ATTACHMENT_DATA: Route = Route::multipart(
  "content.update_attachment_data",
  "/content/{id}/child/attachment/{attachmentId}/data",
);
pub const GET_DESCENDANTS: Route = Route::get("content.get_descendants", "/content/{id}/descendant");
pub const GET_DESCENDANTS_BY_TYPE: Route =
  Route::get("content.get_descendants_by_type", "/content/{id}/descendant/{type}");
pub const GET_LABELS: Route = Route::get("content.get_labels", "/content/{id}/label");
pub const ADD_LABELS: Route = Route::post("content.add_labels", "/content/{id}/label");
pub const REMOVE_LABEL: Route = Route::delete("content.remove_label", "/content/{id}/label/{label}");
pub const GET_PROPERTIES: Route = Route::get("content.get_properties", "/content/{id}/property");
pub const CREATE_PROPERTY: Route = Route::post("content.create_property", "/content/{id}/property");
pub const GET_PROPERTY: Route = Route::get("content.get_property", "/content/{id}/property/{key}");
pub const UPDATE_PROPERTY: Route = Route::put("content.update_property", "/content/{id}/property/{key}");
pub const DELETE_PROPERTY: Route = Route::delete("content.delete_property", "/content/{id}/property/{key}");
pub const GET_RESTRICTIONS: Route = Route::get("content.get_restrictions", "/content/{id}/restriction");
pub const ADD_RESTRICTIONS: Route = Route::post("content.add_restrictions", "/content/{id}/restriction");
pub const UPDATE_RESTRICTIONS: Route = Route::put("content.update_restrictions", "/content/{id}/restriction");
pub const DELETE_RESTRICTIONS: Route = Route::delete("content.delete_restrictions", "/content/{id}/restriction");
pub const GET_RESTRICTIONS_BY_OPERATION: Route = Route::get(
  "content.get_restrictions_by_operation",
  "/content/{id}/restriction/byOperation",
);
pub const GET_RESTRICTIONS_FOR_OPERATION: Route = Route::get(
  "content.get_restrictions_for_operation",
  "/content/{id}/restriction/byOperation/{operationKey}",
);
pub const GET_VERSIONS: Route = Route::get("content.get_versions", "/content/{id}/version");
pub const RESTORE_VERSION: Route = Route::post("content.restore_version", "/content/{id}/version");
pub const GET_VERSION: Route = Route::get("content.get_version", "/content/{id}/version/{versionNumber}");
pub const DELETE_VERSION: Route = Route::delete("content.delete_version", "/content/{id}/version/{versionNumber}");
pub const COPY_PAGE: Route = Route::post("content.copy_page", "/content/{id}/copy");
pub const COPY_PAGE_HIERARCHY: Route = Route::post("content.copy_page_hierarchy", "/content/{id}/pagehierarchy/copy");
pub const CHECK_PERMISSION: Route = Route::post("content.check_permission", "/content/{id}/permission/check");
pub const CONVERT_BODY: Route = Route::post("content.convert_body", "/contentbody/convert/{to}");
pub const PUBLISH_SHARED_DRAFT: Route = Route::put(
  "content.publish_shared_draft",
  "/content/blueprint/instance/{draftId}",
);
pub const PUBLISH_LEGACY_DRAFT: Route = Route::post(
  "content.publish_legacy_draft",
  "/content/blueprint/instance/{draftId}",
);
pub const ARCHIVE_PAGES: Route = Route::post("content.archive_pages", "/content/archive");

pub const ROUTES: &[Route] = &[
  GET_CONTENTS,
  CREATE_CONTENT,
  GET_CONTENT_BY_ID,
  UPDATE_CONTENT,
  DELETE_CONTENT,
  GET_HISTORY,
  GET_MACRO_BODY,
  SEARCH_CONTENT,
  GET_CHILDREN,
  GET_CHILDREN_BY_TYPE,
  GET_COMMENTS,
  GET_ATTACHMENTS,
  CREATE_ATTACHMENT,
  UPDATE_ATTACHMENT_PROPERTIES,
  UPDATE_ATTACHMENT_DATA,
  GET_DESCENDANTS,
  GET_DESCENDANTS_BY_TYPE,
  GET_LABELS,
  ADD_LABELS,
  REMOVE_LABEL,
  GET_PROPERTIES,
  CREATE_PROPERTY,
  GET_PROPERTY,
  UPDATE_PROPERTY,
  DELETE_PROPERTY,
  GET_RESTRICTIONS,
  ADD_RESTRICTIONS,
  UPDATE_RESTRICTIONS,
  DELETE_RESTRICTIONS,
  GET_RESTRICTIONS_BY_OPERATION,
  GET_RESTRICTIONS_FOR_OPERATION,
  GET_VERSIONS,
  RESTORE_VERSION,
  GET_VERSION,
  DELETE_VERSION,
  COPY_PAGE,
  COPY_PAGE_HIERARCHY,
  CHECK_PERMISSION,
  CONVERT_BODY,
  PUBLISH_SHARED_DRAFT,
  PUBLISH_LEGACY_DRAFT,
  ARCHIVE_PAGES,
];

resource! {
  /// Operations on pages, blog posts, comments and attachments.
  Content
}

impl Content {
  /// List content, filtered by `type`, `spaceKey`, `title`, `status` or
  /// `postingDay`.
  ///
  /// # Arguments
  /// * `query` - Filter and paging parameters (`start`, `limit`, `expand`).
  ///
  /// # Returns
  /// The paged result object returned by Confluence.
  pub async fn get_contents(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_CONTENTS, RequestArgs::new().query(query)).await
  }

  /// Create a page, blog post or comment.
  ///
  /// # Arguments
  /// * `body` - Content description: `type`, `title`, `space`, `body` and
  ///   optionally `ancestors`.
  /// * `query` - Optional `status` or `expand` parameters.
  pub async fn create_content<B: Serialize + ?Sized>(&self, body: &B, query: Query) -> Result<Value> {
    let args = RequestArgs::new().query(query).json_body(body)?;
    self.context.invoke(&CREATE_CONTENT, args).await
  }

  /// Fetch a single piece of content.
  ///
  /// # Arguments
  /// * `id` - Content identifier.
  /// * `query` - Optional `status`, `version` and `expand` parameters.
  pub async fn get_content_by_id(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_CONTENT_BY_ID, args).await
  }

  /// Update content. The body must carry `version.number` set to the
  /// current version plus one; reading the current version first is the
  /// caller's job.
  pub async fn update_content<B: Serialize + ?Sized>(&self, id: &str, body: &B, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query).json_body(body)?;
    self.context.invoke(&UPDATE_CONTENT, args).await
  }

  /// Trash content, or purge it when `status=trashed` is passed.
  pub async fn delete_content(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&DELETE_CONTENT, args).await
  }

  pub async fn get_history(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_HISTORY, args).await
  }

  /// Fetch the body of a macro by its id within a given content version.
  pub async fn get_macro_body(&self, id: &str, version: u32, macro_id: &str) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("version", version)
      .path_param("macroId", macro_id);
    self.context.invoke(&GET_MACRO_BODY, args).await
  }

  /// Search content with CQL.
  ///
  /// # Arguments
  /// * `cql` - CQL expression, e.g. `space = DOCS and type = page`.
  /// * `query` - Additional parameters (`cqlcontext`, `limit`, `expand`).
  pub async fn search_content(&self, cql: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().query(Query::new().param("cql", cql)).query(query);
    self.context.invoke(&SEARCH_CONTENT, args).await
  }

  pub async fn get_children(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_CHILDREN, args).await
  }

  /// Direct children of one type (`page`, `comment` or `attachment`).
  pub async fn get_children_by_type(&self, id: &str, content_type: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("type", content_type)
      .query(query);
    self.context.invoke(&GET_CHILDREN_BY_TYPE, args).await
  }

  pub async fn get_comments(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_COMMENTS, args).await
  }

  /// List attachments, optionally filtered by `filename` or `mediaType`.
  pub async fn get_attachments(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_ATTACHMENTS, args).await
  }

  /// Upload a new attachment to `id`.
  ///
  /// # Arguments
  /// * `id` - Content that will own the attachment.
  /// * `form` - File part plus optional `comment` and `minorEdit` fields.
  /// * `query` - Optional `status` parameter.
  ///
  /// # Returns
  /// The created attachment list as returned by Confluence.
  pub async fn create_attachment(&self, id: &str, form: Multipart, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query).multipart(form);
    self.context.invoke(&CREATE_ATTACHMENT, args).await
  }

  /// Update attachment metadata (title, media type, parent). The body must
  /// include the next `version.number`.
  pub async fn update_attachment_properties<B: Serialize + ?Sized>(
    &self,
    id: &str,
    attachment_id: &str,
    body: &B,
  ) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("attachmentId", attachment_id)
      .json_body(body)?;
    self.context.invoke(&UPDATE_ATTACHMENT_PROPERTIES, args).await
  }

  /// Replace the binary data of an existing attachment.
  pub async fn update_attachment_data(
    &self,
    id: &str,
    attachment_id: &str,
    form: Multipart,
    query: Query,
  ) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("attachmentId", attachment_id)
      .query(query)
      .multipart(form);
    self.context.invoke(&UPDATE_ATTACHMENT_DATA, args).await
  }

  pub async fn get_descendants(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_DESCENDANTS, args).await
  }

  pub async fn get_descendants_by_type(&self, id: &str, content_type: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("type", content_type)
      .query(query);
    self.context.invoke(&GET_DESCENDANTS_BY_TYPE, args).await
  }

  pub async fn get_labels(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_LABELS, args).await
  }

  /// Add labels. `labels` is an array of `{prefix, name}` objects.
  pub async fn add_labels<B: Serialize + ?Sized>(&self, id: &str, labels: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).json_body(labels)?;
    self.context.invoke(&ADD_LABELS, args).await
  }

  pub async fn remove_label(&self, id: &str, label: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).path_param("label", label);
    self.context.invoke(&REMOVE_LABEL, args).await
  }

  pub async fn get_properties(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_PROPERTIES, args).await
  }

  /// Create a content property; `body` carries `key` and `value`.
  pub async fn create_property<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).json_body(body)?;
    self.context.invoke(&CREATE_PROPERTY, args).await
  }

  pub async fn get_property(&self, id: &str, key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).path_param("key", key).query(query);
    self.context.invoke(&GET_PROPERTY, args).await
  }

  /// Update a content property; `body` carries `value` and the next
  /// `version.number`.
  pub async fn update_property<B: Serialize + ?Sized>(&self, id: &str, key: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).path_param("key", key).json_body(body)?;
    self.context.invoke(&UPDATE_PROPERTY, args).await
  }

  pub async fn delete_property(&self, id: &str, key: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).path_param("key", key);
    self.context.invoke(&DELETE_PROPERTY, args).await
  }

  pub async fn get_restrictions(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_RESTRICTIONS, args).await
  }

  pub async fn add_restrictions<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).json_body(body)?;
    self.context.invoke(&ADD_RESTRICTIONS, args).await
  }

  /// Replace all restrictions on the content.
  pub async fn update_restrictions<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).json_body(body)?;
    self.context.invoke(&UPDATE_RESTRICTIONS, args).await
  }

  pub async fn delete_restrictions(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&DELETE_RESTRICTIONS, args).await
  }

  pub async fn get_restrictions_by_operation(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_RESTRICTIONS_BY_OPERATION, args).await
  }

  /// Restrictions for one operation (`read` or `update`).
  pub async fn get_restrictions_for_operation(&self, id: &str, operation_key: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("operationKey", operation_key)
      .query(query);
    self.context.invoke(&GET_RESTRICTIONS_FOR_OPERATION, args).await
  }

  pub async fn get_versions(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_VERSIONS, args).await
  }

  /// Restore a historical version; `body` is
  /// `{"operationKey": "restore", "params": {"versionNumber": n, "message": ..}}`.
  pub async fn restore_version<B: Serialize + ?Sized>(&self, id: &str, body: &B, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query).json_body(body)?;
    self.context.invoke(&RESTORE_VERSION, args).await
  }

  pub async fn get_version(&self, id: &str, version_number: u32, query: Query) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("versionNumber", version_number)
      .query(query);
    self.context.invoke(&GET_VERSION, args).await
  }

  pub async fn delete_version(&self, id: &str, version_number: u32) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("id", id)
      .path_param("versionNumber", version_number);
    self.context.invoke(&DELETE_VERSION, args).await
  }

  pub async fn copy_page<B: Serialize + ?Sized>(&self, id: &str, body: &B, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query).json_body(body)?;
    self.context.invoke(&COPY_PAGE, args).await
  }

  /// Copy a page and its descendants. Runs as a long task; the response
  /// carries the task id to poll through [`LongTask`](super::LongTask).
  pub async fn copy_page_hierarchy<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).json_body(body)?;
    self.context.invoke(&COPY_PAGE_HIERARCHY, args).await
  }

  pub async fn check_permission<B: Serialize + ?Sized>(&self, id: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).json_body(body)?;
    self.context.invoke(&CHECK_PERMISSION, args).await
  }

  /// Convert a body between representations (`storage`, `view`,
  /// `export_view`, `editor`).
  ///
  /// # Arguments
  /// * `to` - Target representation.
  /// * `body` - `{"value": .., "representation": ..}` of the source body.
  pub async fn convert_body<B: Serialize + ?Sized>(&self, to: &str, body: &B, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("to", to).query(query).json_body(body)?;
    self.context.invoke(&CONVERT_BODY, args).await
  }

  pub async fn publish_shared_draft<B: Serialize + ?Sized>(
    &self,
    draft_id: &str,
    body: &B,
    query: Query,
  ) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("draftId", draft_id)
      .query(query)
      .json_body(body)?;
    self.context.invoke(&PUBLISH_SHARED_DRAFT, args).await
  }

  pub async fn publish_legacy_draft<B: Serialize + ?Sized>(
    &self,
    draft_id: &str,
    body: &B,
    query: Query,
  ) -> Result<Value> {
    let args = RequestArgs::new()
      .path_param("draftId", draft_id)
      .query(query)
      .json_body(body)?;
    self.context.invoke(&PUBLISH_LEGACY_DRAFT, args).await
  }

  /// Archive pages; `body` is `{"pages": [{"id": ..}, ..]}`.
  pub async fn archive_pages<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&ARCHIVE_PAGES, args).await
  }
}
