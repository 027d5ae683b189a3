//! Typed views over common Confluence payloads.
//!
//! Operations return raw [`serde_json::Value`]s; these structs can be
//! layered on top with [`from_data`](super::from_data) when a caller wants
//! typed access. Only the commonly used fields are modelled and unknown
//! fields are ignored.

use serde::{Deserialize, Serialize};

/// A page, blog post, comment or attachment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
  pub id: String,
  #[serde(rename = "type")]
  /// `page`, `blogpost`, `comment` or `attachment`.
  pub content_type: String,
  pub status: String,
  pub title: String,
  #[serde(default)]
  pub space: Option<SpaceRef>,
  #[serde(default)]
  /// Present when `version` is expanded (it is by default on single reads).
  pub version: Option<Version>,
  #[serde(default)]
  pub body: Option<ContentBody>,
  #[serde(rename = "_links", default)]
  pub links: Option<Links>,
}

/// Body representations included via `expand=body.<representation>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentBody {
  #[serde(default)]
  pub storage: Option<StorageFormat>,
  #[serde(default)]
  pub view: Option<StorageFormat>,
}

/// A body in a named representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageFormat {
  pub value: String,
  /// `storage`, `view`, `editor`, ...
  pub representation: String,
}

/// Space summary embedded in content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceRef {
  pub key: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(rename = "type", default)]
  pub space_type: Option<String>,
}

/// Version metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
  pub number: u32,
  #[serde(default)]
  pub when: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
  #[serde(default)]
  pub minor_edit: bool,
}

impl Version {
  /// The version number an update must carry.
  pub fn next(&self) -> u32 {
    self.number.saturating_add(1)
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Links {
  #[serde(rename = "webui", default)]
  pub web_ui: Option<String>,
  #[serde(rename = "self", default)]
  pub self_link: Option<String>,
  #[serde(default)]
  pub download: Option<String>,
  #[serde(default)]
  pub base: Option<String>,
}

/// Attachment metadata as returned by `get_attachments` and
/// `create_attachment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub version: Option<Version>,
  #[serde(default)]
  pub extensions: Option<AttachmentExtensions>,
  #[serde(rename = "_links", default)]
  pub links: Option<Links>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentExtensions {
  #[serde(default)]
  pub media_type: Option<String>,
  #[serde(default)]
  pub file_size: Option<u64>,
  #[serde(default)]
  pub comment: Option<String>,
}

/// A Confluence user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  /// Cloud account id; absent on Server/Data Center.
  #[serde(default)]
  pub account_id: Option<String>,
  /// Server/Data Center username.
  #[serde(default)]
  pub username: Option<String>,
  #[serde(default)]
  pub email: Option<String>,
  pub display_name: String,
  #[serde(default)]
  pub public_name: Option<String>,
}

impl User {
  /// Whichever identifier the deployment uses.
  pub fn identifier(&self) -> Option<&str> {
    self.account_id.as_deref().or(self.username.as_deref())
  }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResults<T> {
  pub results: Vec<T>,
  #[serde(default)]
  pub start: u64,
  #[serde(default)]
  pub limit: u64,
  #[serde(default)]
  pub size: u64,
  #[serde(rename = "_links", default)]
  pub links: Option<PageLinks>,
}

/// Links on a paginated listing; `next` is present while more results exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
  #[serde(default)]
  pub next: Option<String>,
  #[serde(default)]
  pub base: Option<String>,
}

impl<T> PagedResults<T> {
  pub fn has_more(&self) -> bool {
    self.links.as_ref().is_some_and(|links| links.next.is_some())
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::confluence::from_data;

  #[test]
  fn content_with_version_and_body() {
    let content: Content = from_data(json!({
      "id": "123456",
      "type": "page",
      "status": "current",
      "title": "Getting Started Guide",
      "space": {"key": "DOCS", "name": "Documentation", "type": "global"},
      "version": {"number": 4, "minorEdit": true},
      "body": {"storage": {"value": "<p>Hi</p>", "representation": "storage"}},
      "_links": {"webui": "/spaces/DOCS/pages/123456"},
      "extensions": {"position": 3}
    }))
    .unwrap();

    assert_eq!(content.content_type, "page");
    assert_eq!(content.space.unwrap().key, "DOCS");
    let version = content.version.unwrap();
    assert!(version.minor_edit);
    assert_eq!(version.next(), 5);

    let last = Version {
      number: u32::MAX,
      ..version
    };
    assert_eq!(last.next(), u32::MAX);
    assert_eq!(content.body.unwrap().storage.unwrap().value, "<p>Hi</p>");
    assert_eq!(content.links.unwrap().web_ui.as_deref(), Some("/spaces/DOCS/pages/123456"));
  }

  #[test]
  fn paged_attachments() {
    let page: PagedResults<Attachment> = from_data(json!({
      "results": [{
        "id": "att1",
        "title": "diagram.png",
        "extensions": {"mediaType": "image/png", "fileSize": 2048},
        "_links": {"download": "/download/attachments/1/diagram.png"}
      }],
      "start": 0,
      "limit": 25,
      "size": 1,
      "_links": {"next": "/rest/api/content/1/child/attachment?start=25"}
    }))
    .unwrap();

    assert!(page.has_more());
    let extensions = page.results[0].extensions.as_ref().unwrap();
    assert_eq!(extensions.file_size, Some(2048));
    assert_eq!(extensions.media_type.as_deref(), Some("image/png"));
  }

  #[test]
  fn user_identifier_prefers_account_id() {
    let cloud: User = from_data(json!({"accountId": "abc", "displayName": "Jane"})).unwrap();
    assert_eq!(cloud.identifier(), Some("abc"));

    let server: User = from_data(json!({"username": "jdoe", "displayName": "John"})).unwrap();
    assert_eq!(server.identifier(), Some("jdoe"));
  }
}
