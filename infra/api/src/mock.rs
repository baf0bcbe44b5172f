//! In-memory [`Transport`] driven by a script of canned responses.

use crate::{HttpRequest, RawResponse, RequestError, Transport};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;

type Responder = Box<dyn Fn(&HttpRequest) -> Result<RawResponse, RequestError> + Send + Sync>;

/// Replays queued outcomes in order, then falls back to an optional responder.
///
/// Every request is recorded so tests can assert on URLs, query strings, and bodies.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<RawResponse, RequestError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    responder: Option<Responder>,
}

impl ScriptedTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every request the queue does not cover by calling `responder`.
    #[must_use]
    pub fn with_responder(
        responder: impl Fn(&HttpRequest) -> Result<RawResponse, RequestError> + Send + Sync + 'static,
    ) -> Self {
        Self { responder: Some(Box::new(responder)), ..Self::default() }
    }

    pub fn push_json(&self, status: u16, body: &Value) -> &Self {
        self.push_raw(status, body.to_string())
    }

    pub fn push_raw(&self, status: u16, body: impl Into<String>) -> &Self {
        self.script.lock().push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn push_error(&self, error: RequestError) -> &Self {
        self.script.lock().push_back(Err(error));
        self
    }

    /// Requests seen so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &HttpRequest) -> Result<RawResponse, RequestError> {
        self.requests.lock().push(request.clone());

        if let Some(outcome) = self.script.lock().pop_front() {
            return outcome;
        }
        match &self.responder {
            Some(responder) => responder(request),
            None => {
                Err(RequestError::connection(format!("no scripted response for {}", request.url)))
            },
        }
    }
}

impl fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedTransport")
            .field("remaining", &self.remaining())
            .field("requests", &self.request_count())
            .field("responder", &self.responder.is_some())
            .finish()
    }
}
