//! Terminal styling for CLI output.
//!
//! Every helper returns plain text when colors are disabled, so callers can
//! format unconditionally.

use std::fmt::Display;

use owo_colors::OwoColorize;

use crate::cli::ColorOption;
use crate::confluence::HttpMethod;

/// Semantic color palette honoring `--color`.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
  enabled: bool,
}

impl ColorScheme {
  pub fn new(color_option: ColorOption) -> Self {
    let enabled = match color_option {
      ColorOption::Always => true,
      ColorOption::Never => false,
      ColorOption::Auto => {
        use std::io::IsTerminal;
        std::io::stdout().is_terminal()
      }
    };

    Self { enabled }
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled
  }

  fn paint<T: Display>(&self, text: T, style: impl FnOnce(&T) -> String) -> String {
    if self.enabled { style(&text) } else { text.to_string() }
  }

  pub fn success<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.green().to_string())
  }

  pub fn error<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_red().bold().to_string())
  }

  pub fn warning<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.yellow().to_string())
  }

  pub fn info<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.cyan().to_string())
  }

  pub fn emphasis<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_white().bold().to_string())
  }

  pub fn link<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.blue().underline().to_string())
  }

  pub fn path<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.magenta().to_string())
  }

  pub fn number<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_blue().to_string())
  }

  pub fn code<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.bright_green().to_string())
  }

  pub fn dimmed<T: Display>(&self, text: T) -> String {
    self.paint(text, |t| t.dimmed().to_string())
  }

  /// HTTP verb, padded to a fixed width so route listings line up.
  pub fn method(&self, method: HttpMethod) -> String {
    let padded = format!("{:<6}", method.as_str());
    if !self.enabled {
      return padded;
    }
    match method {
      HttpMethod::Get => padded.green().to_string(),
      HttpMethod::Post => padded.yellow().to_string(),
      HttpMethod::Put => padded.blue().to_string(),
      HttpMethod::Delete => padded.red().to_string(),
    }
  }

  /// Status code colored by class: 2xx green, 3xx yellow, everything else red.
  pub fn status(&self, status: u16) -> String {
    match status {
      200..=299 => self.success(status),
      300..=399 => self.warning(status),
      _ => self.error(status),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn disabled_scheme_returns_plain_text() {
    let scheme = ColorScheme::new(ColorOption::Never);
    assert!(!scheme.is_enabled());
    assert_eq!(scheme.success("ok"), "ok");
    assert_eq!(scheme.error("bad"), "bad");
    assert_eq!(scheme.status(404), "404");
    assert_eq!(scheme.method(HttpMethod::Get), "GET   ");
  }

  #[test]
  fn enabled_scheme_adds_escape_codes() {
    let scheme = ColorScheme::new(ColorOption::Always);
    assert!(scheme.is_enabled());
    assert_ne!(scheme.success("ok"), "ok");
    assert_ne!(scheme.link("https://x"), "https://x");
    assert!(scheme.status(200).contains("200"));
    assert!(scheme.method(HttpMethod::Delete).contains("DELETE"));
  }
}
