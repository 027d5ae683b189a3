//! `confluence-rest routes`: list the declared API routes.

use std::process;

use crate::color::ColorScheme;
use crate::confluence::{Route, all_routes};

pub(crate) fn handle_routes_command(group: Option<&str>, json: bool, colors: &ColorScheme) {
  let routes = select(group);

  if routes.is_empty() {
    eprintln!(
      "{} No routes in group `{}`",
      colors.error("Error:"),
      group.unwrap_or_default()
    );
    eprintln!("  Known groups: {}", groups().join(", "));
    process::exit(4);
  }

  if json {
    match serde_json::to_string_pretty(&routes) {
      Ok(text) => println!("{text}"),
      Err(e) => {
        eprintln!("{} {e}", colors.error("Error:"));
        process::exit(1);
      }
    }
  } else {
    print!("{}", render(&routes, colors));
  }
}

fn select(group: Option<&str>) -> Vec<&'static Route> {
  all_routes()
    .filter(|route| group.is_none_or(|g| route.group() == g))
    .collect()
}

fn groups() -> Vec<&'static str> {
  let mut groups: Vec<&'static str> = all_routes().map(Route::group).collect();
  groups.dedup();
  groups
}

/// Table of routes: verb, path template, then name; `*` marks multipart
/// uploads.
fn render(routes: &[&Route], colors: &ColorScheme) -> String {
  let width = routes.iter().map(|route| route.path.len()).max().unwrap_or(0);
  let mut out = String::new();
  for route in routes {
    let marker = if route.multipart { "*" } else { " " };
    out.push_str(&format!(
      "{} {:<width$} {marker} {}\n",
      colors.method(route.method),
      route.path,
      colors.code(route.name),
    ));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cli::ColorOption;

  #[test]
  fn long_task_table() {
    let colors = ColorScheme::new(ColorOption::Never);
    insta::assert_snapshot!(render(&select(Some("long_task")), &colors), @r"
    GET    /longtask        long_task.get_tasks
    GET    /longtask/{id}   long_task.get_task
    ");
  }

  #[test]
  fn multipart_routes_are_marked() {
    let colors = ColorScheme::new(ColorOption::Never);
    let table = render(&select(Some("content")), &colors);
    let line = table
      .lines()
      .find(|line| line.ends_with("content.create_attachment"))
      .unwrap();
    assert!(line.contains(" * "));
  }

  #[test]
  fn unknown_group_selects_nothing() {
    assert!(select(Some("wiki")).is_empty());
    assert_eq!(select(None).len(), all_routes().count());
  }

  #[test]
  fn groups_are_listed_once() {
    let groups = groups();
    assert!(groups.contains(&"content"));
    assert!(groups.contains(&"long_task"));
    let mut unique = groups.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), groups.len());
  }
}
