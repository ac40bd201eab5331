//! In-memory transport
//!
//! Replays queued responses in order and records every request it was
//! handed. Used by tests and offline fixtures.

use crate::loader::{Request, Transport};
use crate::{Envelope, NetError, Response};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct MemoryTransport {
    responses: RefCell<VecDeque<Result<Response, NetError>>>,
    sent: RefCell<Vec<Request>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response
    pub fn push_response(&self, response: Response) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    /// Queue a transport-level failure
    pub fn push_error(&self, error: NetError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    /// Queue a 200 response carrying `envelope`
    pub fn push_envelope(&self, envelope: &Envelope) {
        // An Envelope always serializes
        let body = serde_json::to_vec(envelope).unwrap_or_default();
        self.push_response(Response { status: 200, body });
    }

    /// Queue a successful envelope
    pub fn push_success(&self, data: Value) {
        self.push_envelope(&Envelope::success(data));
    }

    /// Queue a failed envelope
    pub fn push_failure(&self, message: &str) {
        self.push_envelope(&Envelope::failure(0, message));
    }

    /// Requests sent so far
    pub fn requests(&self) -> Vec<Request> {
        self.sent.borrow().clone()
    }

    /// Responses still queued
    pub fn pending(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Transport for MemoryTransport {
    async fn send(&self, request: Request) -> Result<Response, NetError> {
        tracing::debug!("memory transport: POST {}", request.url);
        self.sent.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(NetError::Network("no response queued".to_string())))
    }
}
