// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP secret-storage backend adapter.
//!
//! Speaks a KV-v1-style contract against a remote secret store:
//! `PUT/GET/DELETE {base}/v1/{path}` with raw bytes as the value, and
//! `GET {base}/v1/{prefix}?list=true` returning `{"keys": [full paths]}`.
//! Authentication is an `X-Vault-Token` header; an optional namespace is
//! sent as `X-Vault-Namespace`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use shroud_config::VaultConfig;
use shroud_core::{SecretStore, ShroudError};

/// Remote KV secret backend over HTTP.
pub struct HttpSecretStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSecretStore {
    /// Builds a backend client from vault connection config.
    ///
    /// The token and namespace become default headers; TLS verification is
    /// controlled by `ssl_verify` and every call carries the configured
    /// timeout.
    pub fn from_config(config: &VaultConfig) -> Result<Self, ShroudError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.token {
            let token = SecretString::from(token.clone());
            let mut value = HeaderValue::from_str(token.expose_secret())
                .map_err(|_| ShroudError::Config("vault token is not a valid header value".to_string()))?;
            value.set_sensitive(true);
            headers.insert("X-Vault-Token", value);
        }
        if let Some(namespace) = &config.namespace {
            headers.insert(
                "X-Vault-Namespace",
                HeaderValue::from_str(namespace).map_err(|_| {
                    ShroudError::Config("vault namespace is not a valid header value".to_string())
                })?,
            );
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(!config.ssl_verify)
            .build()
            .map_err(|e| ShroudError::Storage {
                message: format!("failed to build vault HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.base_url)
    }
}

#[async_trait]
impl SecretStore for HttpSecretStore {
    async fn write_secret(&self, path: &str, data: &[u8]) -> Result<(), ShroudError> {
        let response = self
            .client
            .put(self.endpoint(path))
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| ShroudError::Storage {
                message: format!("vault write to {path} failed"),
                source: Some(Box::new(e)),
            })?;

        if !response.status().is_success() {
            return Err(ShroudError::Storage {
                message: format!("vault write to {path} returned {}", response.status()),
                source: None,
            });
        }
        debug!(path = %path, "secret written");
        Ok(())
    }

    async fn read_secret(&self, path: &str) -> Result<Option<Vec<u8>>, ShroudError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| ShroudError::Storage {
                message: format!("vault read of {path} failed"),
                source: Some(Box::new(e)),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ShroudError::Storage {
                message: format!("vault read of {path} returned {}", response.status()),
                source: None,
            });
        }

        let bytes = response.bytes().await.map_err(|e| ShroudError::Storage {
            message: format!("failed to read vault response body for {path}"),
            source: Some(Box::new(e)),
        })?;
        Ok(Some(bytes.to_vec()))
    }

    async fn delete_secret(&self, path: &str) -> Result<(), ShroudError> {
        let response = self
            .client
            .delete(self.endpoint(path))
            .send()
            .await
            .map_err(|e| ShroudError::Storage {
                message: format!("vault delete of {path} failed"),
                source: Some(Box::new(e)),
            })?;

        // Deleting an absent key is a success for idempotency.
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            debug!(path = %path, "secret deleted");
            return Ok(());
        }
        Err(ShroudError::Storage {
            message: format!("vault delete of {path} returned {}", response.status()),
            source: None,
        })
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ShroudError> {
        let response = self
            .client
            .get(self.endpoint(prefix))
            .query(&[("list", "true")])
            .send()
            .await
            .map_err(|e| ShroudError::Storage {
                message: format!("vault list under {prefix} failed"),
                source: Some(Box::new(e)),
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(ShroudError::Storage {
                message: format!("vault list under {prefix} returned {}", response.status()),
                source: None,
            });
        }

        let body: serde_json::Value =
            response.json().await.map_err(|e| ShroudError::Storage {
                message: format!("vault list response under {prefix} is not valid JSON"),
                source: Some(Box::new(e)),
            })?;
        let keys = body["keys"]
            .as_array()
            .ok_or_else(|| ShroudError::Storage {
                message: format!("vault list response under {prefix} is missing `keys`"),
                source: None,
            })?
            .iter()
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect();
        Ok(keys)
    }
}
