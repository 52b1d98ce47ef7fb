// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vault lifecycle: store, retrieve, list, and delete credentials.
//!
//! Credentials are JSON documents of field name -> value. Sensitive fields
//! are encrypted before the document leaves this process; the backend only
//! ever sees ciphertext for them.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shroud_core::{SecretStore, ShroudError};
use shroud_privacy::CredentialCipher;

use crate::path::CredentialPathBuilder;

/// Encrypted-at-rest credential storage, namespaced per (service, user).
pub struct SecureVault {
    store: Arc<dyn SecretStore>,
    cipher: CredentialCipher,
    paths: CredentialPathBuilder,
}

impl SecureVault {
    pub fn new(
        store: Arc<dyn SecretStore>,
        cipher: CredentialCipher,
        mount: impl Into<String>,
    ) -> Self {
        Self {
            store,
            cipher,
            paths: CredentialPathBuilder::new(mount),
        }
    }

    /// Stores a credential and returns its freshly generated id.
    ///
    /// Ids are UUIDv4, so concurrent stores for the same (service, user)
    /// cannot collide. Sensitive fields are encrypted before the write; on a
    /// backend failure the error propagates and no id is returned.
    pub async fn store_credential(
        &self,
        service: &str,
        user: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<String, ShroudError> {
        validate_segment("service name", service)?;
        validate_segment("user id", user)?;

        let credential_id = Uuid::new_v4().to_string();
        let encrypted = self.cipher.encrypt_fields(fields)?;
        let document = serde_json::to_vec(&encrypted).map_err(|e| ShroudError::Storage {
            message: format!("failed to serialize credential document: {e}"),
            source: Some(Box::new(e)),
        })?;

        let path = self.paths.credential_path(service, user, &credential_id);
        self.store.write_secret(&path, &document).await?;

        debug!(service = %service, user = %user, credential_id = %credential_id, "credential stored");
        Ok(credential_id)
    }

    /// Retrieves and decrypts a credential.
    ///
    /// Returns [`ShroudError::NotFound`] when the backend holds no value at
    /// the derived path.
    pub async fn get_credential(
        &self,
        service: &str,
        user: &str,
        credential_id: &str,
    ) -> Result<BTreeMap<String, String>, ShroudError> {
        validate_segment("service name", service)?;
        validate_segment("user id", user)?;
        validate_segment("credential id", credential_id)?;

        let path = self.paths.credential_path(service, user, credential_id);
        let document = self
            .store
            .read_secret(&path)
            .await?
            .ok_or(ShroudError::NotFound { path: path.clone() })?;

        let encrypted: BTreeMap<String, String> =
            serde_json::from_slice(&document).map_err(|e| ShroudError::Storage {
                message: format!("corrupted credential document at {path}: {e}"),
                source: Some(Box::new(e)),
            })?;
        self.cipher.decrypt_fields(&encrypted)
    }

    /// Permanently removes a credential.
    ///
    /// Idempotent: deleting an absent credential succeeds. There is no
    /// tombstone or versioning; the entry is gone.
    pub async fn delete_credential(
        &self,
        service: &str,
        user: &str,
        credential_id: &str,
    ) -> Result<(), ShroudError> {
        validate_segment("service name", service)?;
        validate_segment("user id", user)?;
        validate_segment("credential id", credential_id)?;

        let path = self.paths.credential_path(service, user, credential_id);
        self.store.delete_secret(&path).await?;
        debug!(service = %service, user = %user, credential_id = %credential_id, "credential deleted");
        Ok(())
    }

    /// Lists credential ids for one (service, user) pair, in storage order.
    ///
    /// Ids only; field values are never read or decrypted here.
    pub async fn list_credentials(
        &self,
        service: &str,
        user: &str,
    ) -> Result<Vec<String>, ShroudError> {
        validate_segment("service name", service)?;
        validate_segment("user id", user)?;

        let prefix = self.paths.scope_prefix(service, user);
        let keys = self.store.list_keys(&prefix).await?;
        Ok(keys
            .iter()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|id| !id.is_empty() && !id.contains('/'))
            .map(str::to_string)
            .collect())
    }
}

impl std::fmt::Debug for SecureVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureVault")
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

/// Path segments come from callers; an empty or slash-containing segment
/// would derive a path addressing the wrong credential.
fn validate_segment(what: &str, value: &str) -> Result<(), ShroudError> {
    if value.is_empty() {
        return Err(ShroudError::Config(format!("{what} must not be empty")));
    }
    if value.contains('/') {
        return Err(ShroudError::Config(format!(
            "{what} must not contain `/`"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shroud_test_utils::MemorySecretStore;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn vault_over(store: Arc<MemorySecretStore>) -> SecureVault {
        SecureVault::new(store, CredentialCipher::generate().unwrap(), "secret")
    }

    #[tokio::test]
    async fn store_and_get_round_trip() {
        let store = Arc::new(MemorySecretStore::new());
        let vault = vault_over(store.clone());

        let input = fields(&[("apiKey", "sk-123"), ("endpoint", "https://api.openai.com")]);
        let id = vault.store_credential("openai", "u1", &input).await.unwrap();

        let retrieved = vault.get_credential("openai", "u1", &id).await.unwrap();
        assert_eq!(retrieved, input);
    }

    #[tokio::test]
    async fn at_rest_value_is_ciphertext() {
        let store = Arc::new(MemorySecretStore::new());
        let vault = vault_over(store.clone());

        let id = vault
            .store_credential("openai", "u1", &fields(&[("apiKey", "sk-123")]))
            .await
            .unwrap();

        let raw = store
            .raw(&format!("secret/credentials/openai/u1/{id}"))
            .await
            .unwrap();
        let raw_text = String::from_utf8(raw).unwrap();
        assert!(!raw_text.contains("sk-123"));
        assert!(raw_text.contains("enc:v1:"));
    }

    #[tokio::test]
    async fn two_stores_produce_distinct_ids() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        let input = fields(&[("apiKey", "sk-123")]);

        let a = vault.store_credential("openai", "u1", &input).await.unwrap();
        let b = vault.store_credential("openai", "u1", &input).await.unwrap();
        assert_ne!(a, b);

        assert_eq!(vault.get_credential("openai", "u1", &a).await.unwrap(), input);
        assert_eq!(vault.get_credential("openai", "u1", &b).await.unwrap(), input);
    }

    #[tokio::test]
    async fn get_absent_credential_is_not_found() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        let err = vault
            .get_credential("openai", "u1", "no-such-id")
            .await
            .unwrap_err();
        assert!(matches!(err, ShroudError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        let id = vault
            .store_credential("openai", "u1", &fields(&[("token", "t")]))
            .await
            .unwrap();

        vault.delete_credential("openai", "u1", &id).await.unwrap();
        let err = vault.get_credential("openai", "u1", &id).await.unwrap_err();
        assert!(matches!(err, ShroudError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_absent_credential_is_idempotent() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        vault
            .delete_credential("openai", "u1", "never-existed")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn list_is_scoped_to_service_and_user() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        let input = fields(&[("apiKey", "sk")]);

        let id1 = vault.store_credential("openai", "u1", &input).await.unwrap();
        let id2 = vault.store_credential("openai", "u1", &input).await.unwrap();
        vault.store_credential("openai", "u2", &input).await.unwrap();
        vault.store_credential("anthropic", "u1", &input).await.unwrap();

        let ids = vault.list_credentials("openai", "u1").await.unwrap();
        assert_eq!(ids, vec![id1, id2]);
    }

    #[tokio::test]
    async fn list_for_empty_scope_is_empty() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        assert!(vault.list_credentials("openai", "u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_on_store_returns_no_id() {
        let store = Arc::new(MemorySecretStore::new());
        let vault = vault_over(store.clone());
        store.fail_next_operations(true).await;

        let err = vault
            .store_credential("openai", "u1", &fields(&[("token", "t")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ShroudError::Storage { .. }));

        store.fail_next_operations(false).await;
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn slash_in_segment_is_rejected() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        let err = vault
            .store_credential("openai/evil", "u1", &fields(&[("token", "t")]))
            .await
            .unwrap_err();
        assert!(matches!(err, ShroudError::Config(_)));

        let err = vault
            .get_credential("openai", "u1", "../other")
            .await
            .unwrap_err();
        assert!(matches!(err, ShroudError::Config(_)));
    }

    #[tokio::test]
    async fn empty_segment_is_rejected() {
        let vault = vault_over(Arc::new(MemorySecretStore::new()));
        let err = vault.list_credentials("", "u1").await.unwrap_err();
        assert!(matches!(err, ShroudError::Config(_)));
    }
}
