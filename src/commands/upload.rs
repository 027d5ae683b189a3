//! `confluence-rest upload`: attach a file to a page or blog post.
//!
//! Without `--attachment-id` the file is added as a new attachment (or a
//! new version when an attachment with the same name already exists, which
//! Confluence handles server side). With it, the data of that specific
//! attachment is replaced.

use std::path::PathBuf;
use std::process;

use clap::Args;
use serde_json::Value;

use super::{connect, render_json, report_api_error};
use crate::cli::Cli;
use crate::color::ColorScheme;
use crate::confluence::models::{Attachment, PagedResults};
use crate::confluence::{Multipart, Query, from_data};

/// Options for `upload`
#[derive(Debug, Args)]
pub struct UploadOptions {
  /// Page or blog post id
  #[arg(value_name = "CONTENT_ID")]
  pub content_id: String,

  /// File to upload
  #[arg(value_name = "FILE")]
  pub file: PathBuf,

  /// Replace the data of this existing attachment
  #[arg(long, value_name = "ID")]
  pub attachment_id: Option<String>,

  /// Version comment stored with the attachment
  #[arg(long, value_name = "TEXT")]
  pub comment: Option<String>,

  /// Do not notify watchers
  #[arg(long)]
  pub minor_edit: bool,
}

impl UploadOptions {
  /// The multipart form for this upload.
  pub fn form(&self) -> Multipart {
    let mut form = Multipart::attachment_from_path(&self.file).minor_edit(self.minor_edit);
    if let Some(comment) = &self.comment {
      form = form.comment(comment.as_str());
    }
    form
  }
}

pub(crate) async fn handle_upload_command(options: &UploadOptions, cli: &Cli, colors: &ColorScheme) {
  let client = connect(cli, colors);
  let form = options.form();

  println!(
    "{} Uploading {} to content {}",
    colors.info("→"),
    colors.path(options.file.display()),
    colors.number(&options.content_id)
  );

  let result = match &options.attachment_id {
    Some(attachment_id) => {
      client
        .content
        .update_attachment_data(&options.content_id, attachment_id, form, Query::new())
        .await
    }
    None => {
      client
        .content
        .create_attachment(&options.content_id, form, Query::new())
        .await
    }
  };

  match result {
    Ok(value) => {
      for line in summarize(&value) {
        println!("{} {line}", colors.success("✓"));
      }
      tracing::debug!("Upload response: {}", render_json(&value));
    }
    Err(e) => {
      report_api_error("Upload failed", &e, colors);
      process::exit(1);
    }
  }
}

/// One line per uploaded attachment. Creation returns a paged listing,
/// a data update returns the attachment itself.
fn summarize(value: &Value) -> Vec<String> {
  let attachments = if value.get("results").is_some() {
    from_data::<PagedResults<Attachment>>(value.clone())
      .map(|page| page.results)
      .unwrap_or_default()
  } else {
    from_data::<Attachment>(value.clone()).map(|a| vec![a]).unwrap_or_default()
  };

  if attachments.is_empty() {
    return vec!["Upload complete".to_string()];
  }

  attachments
    .iter()
    .map(|attachment| match attachment.version.as_ref() {
      Some(version) => format!("{} ({}) version {}", attachment.title, attachment.id, version.number),
      None => format!("{} ({})", attachment.title, attachment.id),
    })
    .collect()
}
