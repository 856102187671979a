//! Scripted transport for wire-format tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use http::StatusCode;

use crate::{FetchError, Request, Response, Transport};

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<Response, FetchError>>>,
    requests: RefCell<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 JSON response.
    pub fn ok(self, body: serde_json::Value) -> Self {
        self.respond(StatusCode::OK, body)
    }

    /// Queue a JSON response with any status.
    pub fn respond(self, status: StatusCode, body: serde_json::Value) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(Response::json_value(status, &body)));
        self
    }

    /// Queue a transport failure.
    pub fn fail(self, error: FetchError) -> Self {
        self.responses.borrow_mut().push_back(Err(error));
        self
    }

    /// Requests sent so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<Response, FetchError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Request("no scripted response left".to_string())))
    }
}
