// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret-storage backend trait for the credential vault.

use async_trait::async_trait;

use crate::error::ShroudError;

/// A key/value secret backend addressed by hierarchical slash-separated paths.
///
/// The vault derives every path deterministically; the backend needs no
/// knowledge of the credential schema. An absent value on read is `Ok(None)`,
/// never an error -- only genuine backend failures surface as
/// [`ShroudError::Storage`].
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Writes (or overwrites) the value at `path`.
    async fn write_secret(&self, path: &str, data: &[u8]) -> Result<(), ShroudError>;

    /// Reads the value at `path`, or `None` if nothing is stored there.
    async fn read_secret(&self, path: &str) -> Result<Option<Vec<u8>>, ShroudError>;

    /// Deletes the value at `path`. Deleting an absent path is a no-op.
    async fn delete_secret(&self, path: &str) -> Result<(), ShroudError>;

    /// Lists full paths under `prefix`, in storage order.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ShroudError>;
}
