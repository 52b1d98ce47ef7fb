// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Shroud workspace.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup. Every value is fixed at construction time; no
//! component re-reads configuration per request.

use serde::{Deserialize, Serialize};

/// Top-level Shroud configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShroudConfig {
    /// Privacy feature toggles applied by the gateway.
    #[serde(default)]
    pub privacy: PrivacyConfig,

    /// Outbound gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Rotating proxy pool used when `privacy.anonymize_requests` is set.
    #[serde(default)]
    pub proxy: ProxyConfig,

    /// Anonymizing overlay endpoint used when `privacy.route_through_tor` is set.
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Secret-storage backend connection settings.
    #[serde(default)]
    pub vault: VaultConfig,
}

/// Privacy feature toggles.
///
/// Immutable for the lifetime of a gateway instance. Each flag gates exactly
/// one processing step; all default to off.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PrivacyConfig {
    /// Route outbound requests through the rotating proxy pool.
    #[serde(default)]
    pub anonymize_requests: bool,

    /// Route outbound requests through the anonymizing overlay (Tor).
    /// Takes priority over `anonymize_requests`.
    #[serde(default)]
    pub route_through_tor: bool,

    /// Remove known tracking fields from structured responses.
    #[serde(default)]
    pub strip_metadata: bool,

    /// Replace sensitive-looking payload fields with a sentinel before any
    /// other processing.
    #[serde(default)]
    pub mask_pii: bool,

    /// Encrypt the (already sanitized) payload into an opaque envelope.
    #[serde(default)]
    pub encrypt_payloads: bool,

    /// Overwrite fingerprinting-prone request headers.
    #[serde(default)]
    pub prevent_fingerprinting: bool,
}

/// Outbound gateway settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Per-request timeout in seconds, applied at the transport boundary.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Rotating proxy pool configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    /// Proxy endpoint URLs the gateway rotates through, e.g.
    /// `http://proxy-1.internal:8080`. Required when
    /// `privacy.anonymize_requests` is set.
    #[serde(default)]
    pub endpoints: Vec<String>,
}

/// Anonymizing overlay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OverlayConfig {
    /// SOCKS5 address of the local overlay client, e.g. a Tor daemon.
    #[serde(default = "default_socks_addr")]
    pub socks_addr: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            socks_addr: default_socks_addr(),
        }
    }
}

/// Secret-storage backend connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VaultConfig {
    /// Backend base URL, e.g. `https://vault.internal:8200`.
    #[serde(default = "default_vault_url")]
    pub url: String,

    /// Authentication token for the backend. `None` requires an environment
    /// variable override (`SHROUD_VAULT_TOKEN`).
    #[serde(default)]
    pub token: Option<String>,

    /// Optional backend namespace header value.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Verify the backend's TLS certificate. Disable only for local
    /// development backends.
    #[serde(default = "default_ssl_verify")]
    pub ssl_verify: bool,

    /// Mount prefix all credential paths are derived under.
    #[serde(default = "default_mount")]
    pub mount: String,

    /// Per-call timeout in seconds for backend operations.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            url: default_vault_url(),
            token: None,
            namespace: None,
            ssl_verify: default_ssl_verify(),
            mount: default_mount(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_socks_addr() -> String {
    "socks5h://127.0.0.1:9050".to_string()
}

fn default_vault_url() -> String {
    "http://127.0.0.1:8200".to_string()
}

fn default_ssl_verify() -> bool {
    true
}

fn default_mount() -> String {
    "secret".to_string()
}
