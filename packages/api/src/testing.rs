//! In-memory [`Transport`] that replays queued responses and records requests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, RawResponse, Transport};

/// Replays queued responses in order. Clones share the same queue and log.
#[derive(Clone, Debug, Default)]
pub struct StubTransport {
    responses: Rc<RefCell<VecDeque<Result<RawResponse, ApiError>>>>,
    requests: Rc<RefCell<Vec<ApiRequest>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, reason(status), body.to_string().into_bytes());
    }

    /// Queue a response with an arbitrary body.
    pub fn push_raw(&self, status: u16, status_text: &str, body: Vec<u8>) {
        self.responses.borrow_mut().push_back(Ok(RawResponse {
            status,
            status_text: status_text.to_string(),
            body,
        }));
    }

    /// Queue a network-level failure.
    pub fn push_error(&self, error: ApiError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "",
    }
}

impl Transport for StubTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no stubbed response".to_string())))
    }
}
