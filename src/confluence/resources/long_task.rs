//! Long-running server tasks (`/longtask`), such as space deletion or page
//! hierarchy copies.

use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const GET_TASKS: Route = Route::get("long_task.get_tasks", "/longtask");
pub const GET_TASK: Route = Route::get("long_task.get_task", "/longtask/{id}");

pub const ROUTES: &[Route] = &[GET_TASKS, GET_TASK];

resource! {
  /// Status of long-running tasks.
  LongTask
}

impl LongTask {
  pub async fn get_tasks(&self, query: Query) -> Result<Value> {
    self.context.invoke(&GET_TASKS, RequestArgs::new().query(query)).await
  }

  /// Progress of one task (`percentageComplete`, `successful`, `messages`).
  pub async fn get_task(&self, id: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().path_param("id", id).query(query);
    self.context.invoke(&GET_TASK, args).await
  }
}
