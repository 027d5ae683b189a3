//! CQL search (`/search`).

use serde_json::Value;

use super::resource;
use crate::confluence::error::Result;
use crate::confluence::request::{Query, RequestArgs};
use crate::confluence::route::Route;

pub const SEARCH: Route = Route::get("search.search", "/search");
pub const SEARCH_USERS: Route = Route::get("search.search_users", "/search/user");

pub const ROUTES: &[Route] = &[SEARCH, SEARCH_USERS];

resource! {
  /// CQL search across content, spaces and users.
  Search
}

impl Search {
  /// Run a CQL search.
  ///
  /// # Arguments
  /// * `cql` - CQL expression, e.g. `type = page and text ~ "release"`.
  /// * `query` - `cqlcontext`, `excerpt`, `start`, `limit` and friends.
  ///
  /// # Returns
  /// The search result page, including `totalSize`.
  pub async fn search(&self, cql: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().query(Query::new().param("cql", cql)).query(query);
    self.context.invoke(&SEARCH, args).await
  }

  /// Search users with a CQL expression such as `user.fullname ~ "jane"`.
  pub async fn search_users(&self, cql: &str, query: Query) -> Result<Value> {
    let args = RequestArgs::new().query(Query::new().param("cql", cql)).query(query);
    self.context.invoke(&SEARCH_USERS, args).await
  }
}
