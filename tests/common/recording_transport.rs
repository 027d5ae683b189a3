//! Transport double that records requests and replays scripted outcomes.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use confluence_rest::confluence::{Credentials, PreparedRequest, RawResponse, Transport, TransportFailure};
use serde_json::{Value, json};

/// A request as the transport saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
  pub request: PreparedRequest,
  pub credentials: Credentials,
}

/// Records every request. Responses are served in the order they were
/// queued; once the queue is empty every request gets `200 {}`.
#[derive(Default)]
pub struct RecordingTransport {
  recorded: Mutex<Vec<Recorded>>,
  outcomes: Mutex<VecDeque<Result<RawResponse, TransportFailure>>>,
}

impl RecordingTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(&self, response: RawResponse) -> &Self {
    self.outcomes.lock().unwrap().push_back(Ok(response));
    self
  }

  pub fn respond_json(&self, status: u16, body: Value) -> &Self {
    self.respond(RawResponse::json(status, &body))
  }

  pub fn fail(&self, failure: TransportFailure) -> &Self {
    self.outcomes.lock().unwrap().push_back(Err(failure));
    self
  }

  pub fn requests(&self) -> Vec<Recorded> {
    self.recorded.lock().unwrap().clone()
  }

  /// The only request sent so far; panics unless exactly one was sent.
  pub fn single(&self) -> Recorded {
    let recorded = self.requests();
    assert_eq!(recorded.len(), 1, "expected exactly one request, got {}", recorded.len());
    recorded.into_iter().next().unwrap()
  }
}

#[async_trait]
impl Transport for RecordingTransport {
  async fn send(&self, request: PreparedRequest, credentials: &Credentials) -> Result<RawResponse, TransportFailure> {
    self.recorded.lock().unwrap().push(Recorded {
      request,
      credentials: credentials.clone(),
    });
    self
      .outcomes
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| Ok(RawResponse::json(200, &json!({}))))
  }
}
