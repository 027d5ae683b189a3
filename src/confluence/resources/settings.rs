//! Look and feel, themes, system information and per-space settings.

use serde::Serialize;
use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_LOOK_AND_FEEL: Route = Route::get("settings.get_look_and_feel", "/settings/lookandfeel");
pub const UPDATE_LOOK_AND_FEEL: Route = Route::post("settings.update_look_and_feel", "/settings/lookandfeel/custom");
pub const SELECT_LOOK_AND_FEEL: Route = Route::put("settings.select_look_and_feel", "/settings/lookandfeel/selected");
pub const GET_SYSTEM_INFO: Route = Route::get("settings.get_system_info", "/settings/systemInfo");
pub const GET_THEMES: Route = Route::get("settings.get_themes", "/settings/theme");
pub const GET_GLOBAL_THEME: Route = Route::get("settings.get_global_theme", "/settings/theme/selected");
pub const GET_THEME: Route = Route::get("settings.get_theme", "/settings/theme/{themeKey}");
pub const GET_SPACE_THEME: Route = Route::get("settings.get_space_theme", "/space/{spaceKey}/theme");
pub const SET_SPACE_THEME: Route = Route::put("settings.set_space_theme", "/space/{spaceKey}/theme");
pub const RESET_SPACE_THEME: Route = Route::delete("settings.reset_space_theme", "/space/{spaceKey}/theme");
pub const GET_SPACE_SETTINGS: Route = Route::get("settings.get_space_settings", "/space/{spaceKey}/settings");
pub const UPDATE_SPACE_SETTINGS: Route = Route::put("settings.update_space_settings", "/space/{spaceKey}/settings");

pub const ROUTES: &[Route] = &[
  GET_LOOK_AND_FEEL,
  UPDATE_LOOK_AND_FEEL,
  SELECT_LOOK_AND_FEEL,
  GET_SYSTEM_INFO,
  GET_THEMES,
  GET_GLOBAL_THEME,
  GET_THEME,
  GET_SPACE_THEME,
  SET_SPACE_THEME,
  RESET_SPACE_THEME,
  GET_SPACE_SETTINGS,
  UPDATE_SPACE_SETTINGS,
];

resource! {
  /// Site and space settings.
  Settings
}

impl Settings {
  /// Look and feel for the site, or for a space when `spaceKey` is given.
  pub async fn get_look_and_feel(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_LOOK_AND_FEEL, RequestArgs::new().query(query)).await
  }

  pub async fn update_look_and_feel<B: Serialize + ?Sized>(&self, body: &B, query: Query) -> Result<Value> {
    let args = RequestArgs::new().query(query).json_body(body)?;
    self.context.invoke(&UPDATE_LOOK_AND_FEEL, args).await
  }

  /// Choose between `global`, `custom` and `theme` look and feel.
  pub async fn select_look_and_feel<B: Serialize + ?Sized>(&self, body: &B) -> Result<Value> {
    let args = RequestArgs::new().json_body(body)?;
    self.context.invoke(&SELECT_LOOK_AND_FEEL, args).await
  }

  pub async fn get_system_info(&self) -> Result<Value> {
    self.context.invoke(&GET_SYSTEM_INFO, RequestArgs::new()).await
  }

  pub async fn get_themes(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_THEMES, RequestArgs::new().query(query)).await
  }

  pub async fn get_global_theme(&self) -> Result<Value> {
    self.context.invoke(&GET_GLOBAL_THEME, RequestArgs::new()).await
  }

  pub async fn get_theme(&self, theme_key: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("themeKey", theme_key);
    self.context.invoke(&GET_THEME, args).await
  }

  pub async fn get_space_theme(&self, space_key: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key);
    self.context.invoke(&GET_SPACE_THEME, args).await
  }

  /// Apply a theme to a space; `body` is `{"themeKey": ..}`.
  pub async fn set_space_theme<B: Serialize + ?Sized>(&self, space_key: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).json_body(body)?;
    self.context.invoke(&SET_SPACE_THEME, args).await
  }

  /// Revert a space to the global theme.
  pub async fn reset_space_theme(&self, space_key: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key);
    self.context.invoke(&RESET_SPACE_THEME, args).await
  }

  pub async fn get_space_settings(&self, space_key: &str) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key);
    self.context.invoke(&GET_SPACE_SETTINGS, args).await
  }

  pub async fn update_space_settings<B: Serialize + ?Sized>(&self, space_key: &str, body: &B) -> Result<Value> {
    let args = RequestArgs::new().path_param("spaceKey", space_key).json_body(body)?;
    self.context.invoke(&UPDATE_SPACE_SETTINGS, args).await
  }
}
