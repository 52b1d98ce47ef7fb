// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound transport trait implemented by the direct, proxy, and
//! anonymizing-overlay adapters.

use async_trait::async_trait;

use crate::error::ShroudError;
use crate::types::{TransportRequest, TransportResponse};

/// A uniform `request -> response` capability over some outbound channel.
///
/// Implementations must be safe to share across tasks; the gateway holds one
/// transport for its whole lifetime and issues exactly one `send` per
/// gateway request. Failures surface as [`ShroudError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes the prepared request and returns the raw response.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, ShroudError>;

    /// Short identifier used in logs (`"direct"`, `"proxy"`, `"overlay"`).
    fn name(&self) -> &str;
}
