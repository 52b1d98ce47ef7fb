// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-selective encryption for credential records.
//!
//! Encrypted values are stored as self-describing marked strings:
//! `enc:v1:<nonce_b64>:<ciphertext_b64>`. Decryption touches only values
//! carrying the marker, so the write and read paths stay symmetric and
//! plaintext fields are never corrupted on read.

use std::collections::BTreeMap;

use shroud_core::ShroudError;

use crate::cipher::{EncryptedPayload, PayloadCipher};
use crate::sensitive::is_sensitive_field;

/// Marker prefix identifying an encrypted field value.
const FIELD_MARKER: &str = "enc:v1:";

/// Encrypts and decrypts the sensitive fields of a credential record.
#[derive(Debug)]
pub struct CredentialCipher {
    cipher: PayloadCipher,
}

impl CredentialCipher {
    pub fn new(cipher: PayloadCipher) -> Self {
        Self { cipher }
    }

    /// Creates a credential cipher with a freshly generated key.
    pub fn generate() -> Result<Self, ShroudError> {
        Ok(Self::new(PayloadCipher::generate()?))
    }

    /// Returns a copy of `fields` with every sensitive field encrypted into
    /// the marked-string form. Non-sensitive fields pass through unchanged.
    pub fn encrypt_fields(
        &self,
        fields: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, ShroudError> {
        let mut out = BTreeMap::new();
        for (name, value) in fields {
            let stored = if is_sensitive_field(name) {
                self.encode_field(value)?
            } else {
                value.clone()
            };
            out.insert(name.clone(), stored);
        }
        Ok(out)
    }

    /// Reverses [`encrypt_fields`](Self::encrypt_fields): values carrying the
    /// `enc:v1:` marker are decrypted, everything else passes through.
    pub fn decrypt_fields(
        &self,
        fields: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, ShroudError> {
        let mut out = BTreeMap::new();
        for (name, value) in fields {
            let restored = match value.strip_prefix(FIELD_MARKER) {
                Some(rest) => self.decode_field(rest)?,
                None => value.clone(),
            };
            out.insert(name.clone(), restored);
        }
        Ok(out)
    }

    fn encode_field(&self, plaintext: &str) -> Result<String, ShroudError> {
        let payload = self.cipher.encrypt(plaintext)?;
        Ok(format!(
            "{FIELD_MARKER}{}:{}",
            payload.nonce, payload.ciphertext
        ))
    }

    fn decode_field(&self, marked_rest: &str) -> Result<String, ShroudError> {
        let (nonce, ciphertext) = marked_rest.split_once(':').ok_or_else(|| {
            ShroudError::Crypto("malformed encrypted field: missing ciphertext".to_string())
        })?;
        self.cipher.decrypt(&EncryptedPayload {
            version: 1,
            nonce: nonce.to_string(),
            ciphertext: ciphertext.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn sensitive_fields_are_encrypted_at_rest() {
        let cipher = CredentialCipher::generate().unwrap();
        let input = fields(&[("api_key", "sk-123"), ("endpoint", "https://api.openai.com")]);

        let stored = cipher.encrypt_fields(&input).unwrap();
        assert!(stored["api_key"].starts_with("enc:v1:"));
        assert!(!stored["api_key"].contains("sk-123"));
        assert_eq!(stored["endpoint"], "https://api.openai.com");
    }

    #[test]
    fn decrypt_restores_original_fields() {
        let cipher = CredentialCipher::generate().unwrap();
        let input = fields(&[
            ("apiKey", "sk-live-abc"),
            ("password", "hunter2"),
            ("org", "acme"),
        ]);

        let stored = cipher.encrypt_fields(&input).unwrap();
        let restored = cipher.decrypt_fields(&stored).unwrap();
        assert_eq!(restored, input);
    }

    #[test]
    fn plaintext_fields_survive_decrypt_untouched() {
        // A record containing no markers must round-trip byte-for-byte;
        // blanket decryption of plaintext would corrupt it.
        let cipher = CredentialCipher::generate().unwrap();
        let input = fields(&[("endpoint", "https://example.com"), ("region", "eu-west-1")]);
        assert_eq!(cipher.decrypt_fields(&input).unwrap(), input);
    }

    #[test]
    fn empty_sensitive_value_round_trips() {
        let cipher = CredentialCipher::generate().unwrap();
        let input = fields(&[("token", "")]);
        let stored = cipher.encrypt_fields(&input).unwrap();
        assert!(stored["token"].starts_with("enc:v1:"));
        assert_eq!(cipher.decrypt_fields(&stored).unwrap()["token"], "");
    }

    #[test]
    fn malformed_marker_is_an_error() {
        let cipher = CredentialCipher::generate().unwrap();
        let input = fields(&[("token", "enc:v1:only-one-part")]);
        assert!(cipher.decrypt_fields(&input).is_err());
    }

    #[test]
    fn decrypt_with_wrong_key_fails() {
        let a = CredentialCipher::generate().unwrap();
        let b = CredentialCipher::generate().unwrap();
        let stored = a.encrypt_fields(&fields(&[("secret", "value")])).unwrap();
        assert!(b.decrypt_fields(&stored).is_err());
    }
}
