// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The privacy gateway: the single call boundary for outbound requests.
//!
//! Each request passes through a fixed transform pipeline, every step gated
//! by its configuration flag: PII sanitation, payload encryption, header
//! anonymization, one transport call, response metadata stripping.
//!
//! Failure logging carries the request URL only -- never the body or
//! headers -- so a failed request cannot leak secrets into logs or traces.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error};

use shroud_config::{validate_config, PrivacyConfig, ShroudConfig};
use shroud_core::{Method, ShroudError, Transport, TransportRequest, TransportResponse};
use shroud_privacy::{HeaderAnonymizer, PayloadCipher, PiiRedactor};

use crate::routing::TransportRoute;
use crate::transport::{DirectTransport, OverlayTransport, ProxyTransport};

/// Response fields removed when `strip_metadata` is on.
///
/// Matching is case-insensitive on the exact field name.
const TRACKING_FIELDS: &[&str] = &[
    "tracking_id",
    "trace_id",
    "request_id",
    "correlation_id",
    "client_ip",
    "ip_address",
    "user_agent",
    "fingerprint",
    "session_id",
    "device_id",
];

/// Privacy-preserving outbound request gateway.
///
/// Holds an immutable [`PrivacyConfig`] and one transport selected at
/// construction time. Every invocation performs exactly one transport call
/// and mutates no ambient state.
pub struct PrivacyGateway {
    privacy: PrivacyConfig,
    route: TransportRoute,
    redactor: PiiRedactor,
    anonymizer: HeaderAnonymizer,
    cipher: Option<PayloadCipher>,
    transport: Arc<dyn Transport>,
}

impl PrivacyGateway {
    /// Builds a gateway from validated configuration, constructing the
    /// transport the routing policy selects.
    ///
    /// Fails fast with a configuration error when validation rejects the
    /// config.
    pub fn from_config(config: &ShroudConfig) -> Result<Self, ShroudError> {
        validate_config(config).map_err(|errors| {
            let joined = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            ShroudError::Config(joined)
        })?;

        let route = TransportRoute::select(&config.privacy);
        let timeout = Duration::from_secs(config.gateway.request_timeout_secs);
        let transport: Arc<dyn Transport> = match route {
            TransportRoute::Direct => Arc::new(DirectTransport::new(timeout)?),
            TransportRoute::Proxy => {
                Arc::new(ProxyTransport::new(&config.proxy.endpoints, timeout)?)
            }
            TransportRoute::AnonymizingOverlay => {
                Arc::new(OverlayTransport::new(&config.overlay.socks_addr, timeout)?)
            }
        };
        debug!(route = %route, "privacy gateway transport selected");

        Self::build(config.privacy, route, transport)
    }

    /// Builds a gateway around an injected transport.
    ///
    /// The routing policy still runs so `route()` reflects what the config
    /// would select; the caller-supplied transport is used regardless. Used
    /// by tests and callers that manage transports themselves.
    pub fn with_transport(
        privacy: PrivacyConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ShroudError> {
        let route = TransportRoute::select(&privacy);
        Self::build(privacy, route, transport)
    }

    fn build(
        privacy: PrivacyConfig,
        route: TransportRoute,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ShroudError> {
        let cipher = if privacy.encrypt_payloads {
            Some(PayloadCipher::generate()?)
        } else {
            None
        };
        Ok(Self {
            privacy,
            route,
            redactor: PiiRedactor::new(),
            anonymizer: HeaderAnonymizer::new(privacy.prevent_fingerprinting),
            cipher,
            transport,
        })
    }

    /// The transport route selected for this instance.
    pub fn route(&self) -> TransportRoute {
        self.route
    }

    /// The payload cipher, present when `encrypt_payloads` is on. Callers
    /// that need to decrypt response-side envelopes share it from here.
    pub fn payload_cipher(&self) -> Option<&PayloadCipher> {
        self.cipher.as_ref()
    }

    /// Executes one outbound request through the privacy pipeline.
    ///
    /// Transport failures are wrapped as [`ShroudError::Privacy`] carrying
    /// the URL only; callers must treat them as non-retryable. Retry policy
    /// lives outside the gateway.
    pub async fn request(
        &self,
        url: &str,
        method: Method,
        payload: Option<&Value>,
        headers: Option<&BTreeMap<String, String>>,
    ) -> Result<TransportResponse, ShroudError> {
        // 1. PII sanitation first, so no later step sees raw sensitive values.
        let mut body = payload.map(|p| {
            if self.privacy.mask_pii {
                self.redactor.sanitize(p)
            } else {
                p.clone()
            }
        });

        // 2. Wrap the (already sanitized) payload into an opaque envelope.
        if let (Some(cipher), Some(plain)) = (&self.cipher, &body) {
            let serialized = serde_json::to_string(plain).map_err(|e| {
                ShroudError::Crypto(format!("failed to serialize payload for encryption: {e}"))
            })?;
            let envelope = cipher.encrypt(&serialized)?;
            body = Some(serde_json::to_value(&envelope).map_err(|e| {
                ShroudError::Crypto(format!("failed to encode payload envelope: {e}"))
            })?);
        }

        // 3. Header anonymization; authorization headers pass through.
        let supplied = headers.cloned().unwrap_or_default();
        let headers = self.anonymizer.anonymize(&supplied);

        let request = TransportRequest {
            url: url.to_string(),
            method,
            body,
            headers,
        };

        // 4+5. One transport call through the route selected at construction.
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(cause) => {
                // URL only. Logging the body or headers here would undo the
                // sanitation performed above.
                error!(url = %url, transport = self.transport.name(), "outbound request failed");
                return Err(ShroudError::Privacy {
                    url: url.to_string(),
                    source: Box::new(cause),
                });
            }
        };

        // 6. Strip known tracking fields from structured responses.
        let response = if self.privacy.strip_metadata {
            TransportResponse {
                status: response.status,
                body: strip_tracking_fields(response.body),
            }
        } else {
            response
        };

        Ok(response)
    }
}

impl std::fmt::Debug for PrivacyGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivacyGateway")
            .field("route", &self.route)
            .field("privacy", &self.privacy)
            .finish_non_exhaustive()
    }
}

/// Remove known tracking fields from the top level of an object response.
/// Non-object responses pass through unchanged.
fn strip_tracking_fields(body: Value) -> Value {
    match body {
        Value::Object(mut map) => {
            map.retain(|key, _| {
                let lower = key.to_lowercase();
                !TRACKING_FIELDS.contains(&lower.as_str())
            });
            Value::Object(map)
        }
        other => other,
    }
}
