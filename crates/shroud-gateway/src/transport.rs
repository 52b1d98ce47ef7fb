// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concrete transport adapters: direct, rotating proxy, and anonymizing
//! overlay.
//!
//! Each adapter wraps a reqwest client built with an explicit per-call
//! timeout. The proxy and overlay endpoints themselves are external
//! collaborators; these adapters only hand requests to them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use shroud_core::{Method, ShroudError, Transport, TransportRequest, TransportResponse};

/// Plain outbound transport with no intermediary.
pub struct DirectTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl DirectTransport {
    pub fn new(timeout: Duration) -> Result<Self, ShroudError> {
        Ok(Self {
            client: build_client(timeout, None)?,
            timeout,
        })
    }
}

#[async_trait]
impl Transport for DirectTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShroudError> {
        execute(&self.client, request, self.timeout).await
    }

    fn name(&self) -> &str {
        "direct"
    }
}

/// Transport that rotates round-robin over a pool of proxy endpoints.
///
/// One client is built per endpoint at construction; per-request work is
/// just an atomic counter increment.
#[derive(Debug)]
pub struct ProxyTransport {
    clients: Vec<reqwest::Client>,
    next: AtomicUsize,
    timeout: Duration,
}

impl ProxyTransport {
    pub fn new(endpoints: &[String], timeout: Duration) -> Result<Self, ShroudError> {
        if endpoints.is_empty() {
            return Err(ShroudError::Config(
                "proxy transport requires at least one endpoint".to_string(),
            ));
        }
        let clients = endpoints
            .iter()
            .map(|endpoint| build_client(timeout, Some(endpoint)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            clients,
            next: AtomicUsize::new(0),
            timeout,
        })
    }
}

#[async_trait]
impl Transport for ProxyTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShroudError> {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.clients.len();
        debug!(proxy_index = index, "routing through proxy pool");
        execute(&self.clients[index], request, self.timeout).await
    }

    fn name(&self) -> &str {
        "proxy"
    }
}

/// Transport that routes through an anonymizing overlay via its local SOCKS5
/// endpoint (e.g. a Tor daemon on 127.0.0.1:9050).
pub struct OverlayTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl OverlayTransport {
    pub fn new(socks_addr: &str, timeout: Duration) -> Result<Self, ShroudError> {
        Ok(Self {
            client: build_client(timeout, Some(socks_addr))?,
            timeout,
        })
    }
}

#[async_trait]
impl Transport for OverlayTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShroudError> {
        execute(&self.client, request, self.timeout).await
    }

    fn name(&self) -> &str {
        "overlay"
    }
}

/// Build a reqwest client with the per-call timeout and optional proxy.
fn build_client(timeout: Duration, proxy: Option<&str>) -> Result<reqwest::Client, ShroudError> {
    let mut builder = reqwest::Client::builder().timeout(timeout);
    if let Some(proxy_url) = proxy {
        let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
            ShroudError::Config(format!("invalid proxy endpoint `{proxy_url}`: {e}"))
        })?;
        builder = builder.proxy(proxy);
    }
    builder.build().map_err(|e| ShroudError::Transport {
        message: format!("failed to build HTTP client: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Execute a prepared request on the given client.
///
/// Response bodies are decoded as JSON where possible; other bodies are
/// carried as a JSON string and empty bodies as null.
async fn execute(
    client: &reqwest::Client,
    request: TransportRequest,
    timeout: Duration,
) -> Result<TransportResponse, ShroudError> {
    let method = match request.method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Patch => reqwest::Method::PATCH,
    };

    let mut builder = client.request(method, &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = &request.body {
        builder = builder.json(body);
    }

    let response = builder.send().await.map_err(|e| {
        if e.is_timeout() {
            ShroudError::Timeout { duration: timeout }
        } else {
            ShroudError::Transport {
                message: format!("request to {} failed", request.url),
                source: Some(Box::new(e)),
            }
        }
    })?;

    let status = response.status().as_u16();
    let text = response.text().await.map_err(|e| {
        if e.is_timeout() {
            ShroudError::Timeout { duration: timeout }
        } else {
            ShroudError::Transport {
                message: format!("failed to read response body from {}", request.url),
                source: Some(Box::new(e)),
            }
        }
    })?;

    let body = if text.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
    };

    Ok(TransportResponse { status, body })
}
