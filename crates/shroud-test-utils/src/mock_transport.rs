// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock transport for deterministic gateway testing.
//!
//! `MockTransport` implements `Transport` with a FIFO queue of pre-configured
//! responses and records every request it receives, enabling fast,
//! CI-runnable tests without network calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shroud_core::{ShroudError, Transport, TransportRequest, TransportResponse};

/// A mock transport that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty, a default
/// `200` response with a null body is returned. When `fail` is set, every
/// send fails with a transport error instead.
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<TransportResponse>>>,
    requests: Arc<Mutex<Vec<TransportRequest>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockTransport {
    /// Create a mock transport with an empty response queue.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Create a mock transport pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<TransportResponse>) -> Self {
        let transport = Self::new();
        {
            let queue = transport.responses.clone();
            // Constructor context, no concurrent access yet.
            let mut guard = queue.try_lock().expect("fresh mutex");
            guard.extend(responses);
        }
        transport
    }

    /// Queue a response.
    pub async fn add_response(&self, response: TransportResponse) {
        self.responses.lock().await.push_back(response);
    }

    /// Make every subsequent send fail with a transport error.
    pub async fn fail_sends(&self, fail: bool) {
        *self.fail.lock().await = fail;
    }

    /// All requests received so far, in order.
    pub async fn recorded_requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of sends performed.
    pub async fn send_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShroudError> {
        self.requests.lock().await.push(request);

        if *self.fail.lock().await {
            return Err(ShroudError::Transport {
                message: "simulated transport failure".to_string(),
                source: None,
            });
        }

        Ok(self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or(TransportResponse {
                status: 200,
                body: serde_json::Value::Null,
            }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroud_core::Method;

    #[tokio::test]
    async fn records_requests_and_pops_responses() {
        let transport = MockTransport::with_responses(vec![TransportResponse {
            status: 201,
            body: serde_json::json!({"ok": true}),
        }]);

        let response = transport
            .send(TransportRequest::new("https://example.com", Method::Post))
            .await
            .unwrap();
        assert_eq!(response.status, 201);
        assert_eq!(transport.send_count().await, 1);

        // Queue exhausted -- default response.
        let next = transport
            .send(TransportRequest::new("https://example.com", Method::Get))
            .await
            .unwrap();
        assert_eq!(next.status, 200);

        // Responses queued after construction are served in FIFO order.
        transport
            .add_response(TransportResponse {
                status: 418,
                body: serde_json::Value::Null,
            })
            .await;
        let queued = transport
            .send(TransportRequest::new("https://example.com", Method::Get))
            .await
            .unwrap();
        assert_eq!(queued.status, 418);
    }

    #[tokio::test]
    async fn fail_sends_surfaces_transport_error() {
        let transport = MockTransport::new();
        transport.fail_sends(true).await;
        let err = transport
            .send(TransportRequest::new("https://example.com", Method::Get))
            .await
            .unwrap_err();
        assert!(matches!(err, ShroudError::Transport { .. }));
        // The failed request is still recorded.
        assert_eq!(transport.send_count().await, 1);
    }
}
