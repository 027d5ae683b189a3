//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod recording_transport;

use std::sync::Arc;

use confluence_rest::{ClientConfig, ConfluenceClient};
use recording_transport::RecordingTransport;

pub const BASE_URL: &str = "https://x/wiki/rest/api";

/// A client wired to a fresh recording transport.
pub fn recording_client() -> (ConfluenceClient, Arc<RecordingTransport>) {
  let transport = Arc::new(RecordingTransport::new());
  let client = ConfluenceClient::with_transport(ClientConfig::new(BASE_URL, "jane@example.com", "api-token"), transport.clone())
    .expect("valid config");
  (client, transport)
}
