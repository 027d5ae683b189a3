//! Content templates and blueprints (`/template`).

use serde::Serialize;
use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_PAGE_TEMPLATES: Route = Route::get("template.get_page_templates", "/template/page");
pub const GET_BLUEPRINT_TEMPLATES: Route = Route::get("template.get_blueprint_templates", "/template/blueprint");
pub const CREATE_TEMPLATE: Route = Route::post("template.create_template", "/template");
pub const UPDATE_TEMPLATE: Route = Route::put("template.update_template", "/template");
pub const GET_TEMPLATE: Route = Route::get("template.get_template", "/template/{contentTemplateId}");
pub const REMOVE_TEMPLATE: Route = Route::delete("template.remove_template", "/template/{contentTemplateId}");

pub const ROUTES: &[Route] = &[
  GET_PAGE_TEMPLATES,
  GET_BLUEPRINT_TEMPLATES,
  CREATE_TEMPLATE,
  UPDATE_TEMPLATE,
  GET_TEMPLATE,
  REMOVE_TEMPLATE,
];

resource! {
  /// Page templates and blueprints, global or per space.
  Template
}

impl Template {
  /// Page templates; pass `spaceKey` for space templates.
  pub async fn get_page_templates(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_PAGE_TEMPLATES, RequestArgs::new().query(query)).await
  }

  pub async fn get_blueprint_templates(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_BLUEPRINT_TEMPLATES, RequestArgs::new().query(query)).await
  }

  /// Create a template; `body` carries `name`, `templateType` and `body`.
  pub async fn create_template<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&CREATE_TEMPLATE, args).await
  }

  /// Update a template; `body` must include `templateId`.
  pub async fn update_template<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&UPDATE_TEMPLATE, args).await
  }

  pub async fn get_template(&self, content_template_id: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("contentTemplateId", content_template_id);
    self.context.invoke(&GET_TEMPLATE, args).await
  }

  pub async fn remove_template(&self, content_template_id: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("contentTemplateId", content_template_id);
    self.context.invoke(&REMOVE_TEMPLATE, args).await
  }
}
