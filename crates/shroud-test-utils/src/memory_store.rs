// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `SecretStore` for deterministic testing.
//!
//! Preserves insertion order so `list_keys` reflects storage order, matching
//! the contract the vault's `list_credentials` relies on.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shroud_core::{SecretStore, ShroudError};

/// An in-memory secret backend backed by an ordered vector of entries.
///
/// Overwrites keep the entry's original position; new keys append.
#[derive(Clone, Default)]
pub struct MemorySecretStore {
    entries: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    /// When set, every operation fails with a storage error. Used to test
    /// backend-failure paths.
    fail: Arc<Mutex<bool>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make all subsequent operations fail with `ShroudError::Storage`.
    pub async fn fail_next_operations(&self, fail: bool) {
        *self.fail.lock().await = fail;
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// True when the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Raw stored bytes at `path`, bypassing the trait. Lets tests assert on
    /// the at-rest representation.
    pub async fn raw(&self, path: &str) -> Option<Vec<u8>> {
        self.entries
            .lock()
            .await
            .iter()
            .find(|(k, _)| k == path)
            .map(|(_, v)| v.clone())
    }

    async fn check_failure(&self) -> Result<(), ShroudError> {
        if *self.fail.lock().await {
            return Err(ShroudError::Storage {
                message: "simulated backend failure".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn write_secret(&self, path: &str, data: &[u8]) -> Result<(), ShroudError> {
        self.check_failure().await?;
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.iter_mut().find(|(k, _)| k == path) {
            entry.1 = data.to_vec();
        } else {
            entries.push((path.to_string(), data.to_vec()));
        }
        Ok(())
    }

    async fn read_secret(&self, path: &str) -> Result<Option<Vec<u8>>, ShroudError> {
        self.check_failure().await?;
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .find(|(k, _)| k == path)
            .map(|(_, v)| v.clone()))
    }

    async fn delete_secret(&self, path: &str) -> Result<(), ShroudError> {
        self.check_failure().await?;
        self.entries.lock().await.retain(|(k, _)| k != path);
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ShroudError> {
        self.check_failure().await?;
        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}
