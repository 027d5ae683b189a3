//! Resource groups of the Confluence REST API.
//!
//! Each submodule declares a static `ROUTES` table and a resource type whose
//! methods map positional identifiers, an optional [`Query`] and an optional
//! body onto one of those routes.
//!
//! [`Query`]: super::request::Query

/// Declares a resource type holding the shared client context.
macro_rules! resource {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Debug, Clone)]
    pub struct $name {
      context: std::sync::Arc<crate::confluence::client::ClientContext>,
    }

    impl $name {
      pub(crate) fn new(context: std::sync::Arc<crate::confluence::client::ClientContext>) -> Self {
        Self { context }
      }
    }
  };
}

pub(crate) use resource;

pub mod audit;
pub mod content;
pub mod group;
pub mod long_task;
pub mod relation;
pub mod search;
pub mod settings;
pub mod space;
pub mod template;
pub mod user;

pub use audit::Audit;
pub use content::Content;
pub use group::Group;
pub use long_task::LongTask;
pub use relation::{Entity, Relation};
pub use search::Search;
pub use settings::Settings;
pub use space::Space;
pub use template::Template;
pub use user::User;
