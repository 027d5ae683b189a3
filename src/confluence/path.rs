//! URL template resolution.
//!
//! Route paths are written as templates such as `/content/{id}/label/{label}`.
//! Resolution substitutes each placeholder with the percent-encoded value
//! supplied by the caller and then joins the result onto the client's base
//! URL.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// Everything except RFC 3986 unreserved characters is escaped.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// A placeholder appeared in the template without a value in the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPlaceholder(pub String);

/// Iterate the placeholder names of `template` in order of appearance.
pub fn placeholders(template: &str) -> impl Iterator<Item = &str> {
  template.split('{').skip(1).filter_map(|chunk| chunk.split_once('}').map(|(name, _)| name))
}

/// Substitute every `{name}` in `template` with its encoded value.
///
/// # Errors
/// Returns the first placeholder that has no entry in `params`.
pub fn resolve_path(template: &str, params: &BTreeMap<String, String>) -> Result<String, MissingPlaceholder> {
  let mut resolved = String::with_capacity(template.len());
  let mut rest = template;

  while let Some(start) = rest.find('{') {
    let Some(len) = rest[start..].find('}') else {
      break;
    };
    let name = &rest[start + 1..start + len];
    let value = params.get(name).ok_or_else(|| MissingPlaceholder(name.to_string()))?;

    resolved.push_str(&rest[..start]);
    resolved.extend(utf8_percent_encode(value, PATH_SEGMENT));
    rest = &rest[start + len + 1..];
  }

  resolved.push_str(rest);
  Ok(resolved)
}

/// Append an already-resolved `path` and the query pairs to `base`.
///
/// The base may carry its own path prefix (`/wiki/rest/api`); the resolved
/// path is appended to it rather than replacing it.
pub fn join_url<'a>(base: &Url, path: &str, query: impl IntoIterator<Item = (&'a str, &'a str)>) -> Url {
  let mut url = base.clone();
  let joined = format!("{}/{}", base.path().trim_end_matches('/'), path.trim_start_matches('/'));
  url.set_path(&joined);
  url.set_query(None);

  let mut query = query.into_iter().peekable();
  if query.peek().is_some() {
    url.query_pairs_mut().extend_pairs(query);
  }

  url
}
