// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared request and response types exchanged between the gateway and its
//! transport collaborators.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShroudError;

/// HTTP methods the gateway accepts for outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Patch => "PATCH",
        };
        f.write_str(s)
    }
}

impl FromStr for Method {
    type Err = ShroudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "DELETE" => Ok(Method::Delete),
            "PATCH" => Ok(Method::Patch),
            other => Err(ShroudError::Config(format!(
                "unsupported HTTP method `{other}`"
            ))),
        }
    }
}

/// A fully prepared outbound request, handed to a [`Transport`] for execution.
///
/// Headers use a `BTreeMap` so header order is deterministic in tests and
/// serialized forms. Header name lookup is case-sensitive by design; the
/// gateway normalizes the names it owns before insertion.
///
/// [`Transport`]: crate::traits::Transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportRequest {
    pub url: String,
    pub method: Method,
    /// Request body, already sanitized/encrypted by the gateway when the
    /// corresponding privacy flags are on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl TransportRequest {
    /// Creates a request with no body and no headers.
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            body: None,
            headers: BTreeMap::new(),
        }
    }
}

/// The transport-level response returned to the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as JSON where possible; plain text bodies are
    /// carried as a JSON string, empty bodies as `Value::Null`.
    pub body: serde_json::Value,
}

impl TransportResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
