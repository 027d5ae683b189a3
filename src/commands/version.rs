//! `confluence-rest version`: build metadata.
//!
//! Prints a human-readable summary, a JSON document, or with `--short` just
//! the semantic version.

use serde_json::json;

use crate::color::ColorScheme;

pub(crate) fn handle_version_command(json: bool, short: bool, colors: &ColorScheme) {
  let version = env!("CARGO_PKG_VERSION");

  if short {
    println!("{version}");
    return;
  }

  let git_hash = env!("GIT_HASH");
  let built = format_timestamp(env!("BUILD_TIMESTAMP"));
  let target = env!("TARGET");
  let rustc = env!("RUSTC_VERSION");

  if json {
    let doc = json!({
      "version": version,
      "git_commit": git_hash,
      "build_timestamp": built,
      "target": target,
      "rust_version": rustc,
      "api_routes": crate::confluence::all_routes().count(),
    });
    println!("{}", super::render_json(&doc));
  } else {
    println!("{} {}", colors.emphasis("confluence-rest"), colors.number(version));
    println!("{}: {}", colors.emphasis("Git commit"), colors.code(git_hash));
    println!("{}: {}", colors.emphasis("Built"), colors.dimmed(&built));
    println!("{}: {}", colors.emphasis("Target"), target);
    println!("{}: {}", colors.emphasis("Rust version"), rustc);
  }
}

/// Render a Unix-seconds build timestamp as UTC; unparsable input is
/// returned unchanged.
fn format_timestamp(timestamp: &str) -> String {
  timestamp
    .parse::<i64>()
    .ok()
    .and_then(|secs| chrono::DateTime::<chrono::Utc>::from_timestamp(secs, 0))
    .map(|datetime| datetime.format("%Y-%m-%d %H:%M:%S UTC").to_string())
    .unwrap_or_else(|| timestamp.to_string())
}
