//! Build script for confluence-rest
//!
//! Embeds version and build metadata for `confluence-rest version`.

use std::env;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
  embed_build_info();

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
  println!("cargo:rerun-if-env-changed=TARGET");
}

/// Run a command and return its trimmed stdout, if it succeeded.
fn command_output(program: &str, args: &[&str]) -> Option<String> {
  let output = Command::new(program).args(args).output().ok()?;
  if !output.status.success() {
    return None;
  }
  let text = String::from_utf8(output.stdout).ok()?.trim().to_string();
  (!text.is_empty()).then_some(text)
}

fn embed_build_info() {
  let git_hash = command_output("git", &["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=GIT_HASH={git_hash}");

  let timestamp = SystemTime::now()
    .duration_since(UNIX_EPOCH)
    .map(|elapsed| elapsed.as_secs())
    .unwrap_or_default();
  println!("cargo:rustc-env=BUILD_TIMESTAMP={timestamp}");

  println!("cargo:rustc-env=TARGET={}", env::var("TARGET").unwrap_or_default());

  let rustc = env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string());
  let rustc_version = command_output(&rustc, &["--version"]).unwrap_or_else(|| "unknown".to_string());
  println!("cargo:rustc-env=RUSTC_VERSION={rustc_version}");
}
