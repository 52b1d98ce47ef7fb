// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shallow PII redaction over structured payloads.
//!
//! Runs before every other gateway transform so later steps (encryption,
//! transport, logging) never see raw sensitive values.

use serde_json::Value;

use crate::sensitive::{is_sensitive_field, REDACTED};

/// Replaces sensitive-looking top-level fields with a fixed sentinel.
///
/// Only one level of key/value pairs is inspected; nested objects are left
/// as-is. Non-object input passes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiiRedactor;

impl PiiRedactor {
    pub fn new() -> Self {
        Self
    }

    /// Returns a sanitized copy of `data`. The input is never mutated, and
    /// the operation is idempotent: the sentinel itself matches no marker.
    pub fn sanitize(&self, data: &Value) -> Value {
        match data {
            Value::Object(map) => {
                let sanitized = map
                    .iter()
                    .map(|(key, value)| {
                        if is_sensitive_field(key) {
                            (key.clone(), Value::String(REDACTED.to_string()))
                        } else {
                            (key.clone(), value.clone())
                        }
                    })
                    .collect();
                Value::Object(sanitized)
            }
            other => other.clone(),
        }
    }
}
