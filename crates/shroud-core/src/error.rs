// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Shroud workspace.

use thiserror::Error;

/// The primary error type used across the gateway and vault crates.
#[derive(Debug, Error)]
pub enum ShroudError {
    /// Configuration errors (invalid construction options, bad TOML, missing fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport errors (outbound network call failure).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Secret-storage backend errors (connection, write, list failures).
    #[error("storage error: {message}")]
    Storage {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No credential exists at the derived vault path.
    #[error("credential not found at {path}")]
    NotFound { path: String },

    /// Gateway-level wrapper for transport failures.
    ///
    /// The message carries the request URL only. The request body and headers
    /// must never appear here, so the error can be logged and traced without
    /// leaking secrets.
    #[error("privacy gateway request to {url} failed")]
    Privacy {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Cipher failures (key setup, seal/open, envelope decoding).
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privacy_error_display_contains_url_only() {
        let err = ShroudError::Privacy {
            url: "https://api.example.com/v1".to_string(),
            source: Box::new(std::io::Error::other("connection reset")),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://api.example.com/v1"));
        assert!(!msg.contains("connection reset"));
    }

    #[test]
    fn privacy_error_preserves_cause() {
        let err = ShroudError::Privacy {
            url: "https://api.example.com".to_string(),
            source: Box::new(std::io::Error::other("connection reset")),
        };
        let cause = std::error::Error::source(&err).expect("cause should be preserved");
        assert!(cause.to_string().contains("connection reset"));
    }

    #[test]
    fn not_found_names_the_path() {
        let err = ShroudError::NotFound {
            path: "secret/credentials/openai/u1/abc".to_string(),
        };
        assert!(err.to_string().contains("secret/credentials/openai/u1/abc"));
    }
}
