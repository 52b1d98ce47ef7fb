// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AES-256-GCM payload encryption.
//!
//! Every call to [`PayloadCipher::encrypt`] generates a fresh random 96-bit
//! nonce via the system CSPRNG. Nonce reuse would be catastrophic for GCM
//! security.

use base64::engine::general_purpose::STANDARD_NO_PAD as B64;
use base64::Engine;
use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use shroud_core::ShroudError;
use zeroize::Zeroizing;

/// Envelope format version for [`EncryptedPayload`].
const ENVELOPE_VERSION: u8 = 1;

/// An opaque encrypted payload: ciphertext plus the metadata needed to
/// decrypt it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    /// Envelope format version.
    pub version: u8,
    /// Base64 (no padding) 96-bit nonce.
    pub nonce: String,
    /// Base64 (no padding) ciphertext with the 16-byte GCM tag appended.
    pub ciphertext: String,
}

/// Symmetric cipher over opaque text payloads.
///
/// Debug output intentionally omits the key.
pub struct PayloadCipher {
    // Only in memory, zeroized on drop.
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCipher")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

impl PayloadCipher {
    /// Creates a cipher from an existing 32-byte key.
    pub fn new(key: [u8; 32]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Creates a cipher with a freshly generated random key.
    pub fn generate() -> Result<Self, ShroudError> {
        let rng = SystemRandom::new();
        let mut key = [0u8; 32];
        rng.fill(&mut key)
            .map_err(|_| ShroudError::Crypto("failed to generate random key".to_string()))?;
        Ok(Self::new(key))
    }

    /// Encrypts arbitrary text (including empty and non-ASCII strings) into
    /// an opaque envelope.
    pub fn encrypt(&self, plaintext: &str) -> Result<EncryptedPayload, ShroudError> {
        let (ciphertext, nonce) = self.seal(plaintext.as_bytes())?;
        Ok(EncryptedPayload {
            version: ENVELOPE_VERSION,
            nonce: B64.encode(nonce),
            ciphertext: B64.encode(ciphertext),
        })
    }

    /// Decrypts an envelope produced by [`encrypt`](Self::encrypt), yielding
    /// exactly the original text.
    pub fn decrypt(&self, payload: &EncryptedPayload) -> Result<String, ShroudError> {
        if payload.version != ENVELOPE_VERSION {
            return Err(ShroudError::Crypto(format!(
                "unsupported envelope version {}",
                payload.version
            )));
        }
        let nonce_bytes = B64
            .decode(&payload.nonce)
            .map_err(|e| ShroudError::Crypto(format!("corrupted envelope nonce: {e}")))?;
        let nonce: [u8; 12] = nonce_bytes
            .try_into()
            .map_err(|_| ShroudError::Crypto("corrupted nonce (expected 12 bytes)".to_string()))?;
        let ciphertext = B64
            .decode(&payload.ciphertext)
            .map_err(|e| ShroudError::Crypto(format!("corrupted envelope ciphertext: {e}")))?;

        let plaintext = self.open(&nonce, &ciphertext)?;
        String::from_utf8(plaintext)
            .map_err(|e| ShroudError::Crypto(format!("decrypted value is not valid UTF-8: {e}")))
    }

    /// Encrypt with AES-256-GCM using a random 96-bit nonce.
    ///
    /// Returns `(ciphertext_with_tag, nonce_bytes)`.
    fn seal(&self, plaintext: &[u8]) -> Result<(Vec<u8>, [u8; 12]), ShroudError> {
        let unbound = UnboundKey::new(&AES_256_GCM, &*self.key)
            .map_err(|_| ShroudError::Crypto("failed to create AES-256-GCM key".to_string()))?;
        let less_safe = LessSafeKey::new(unbound);

        let rng = SystemRandom::new();
        let mut nonce_bytes = [0u8; 12];
        rng.fill(&mut nonce_bytes)
            .map_err(|_| ShroudError::Crypto("failed to generate random nonce".to_string()))?;

        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        // Seal in place: plaintext buffer is extended with the authentication tag.
        let mut in_out = plaintext.to_vec();
        less_safe
            .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| ShroudError::Crypto("AES-256-GCM encryption failed".to_string()))?;

        Ok((in_out, nonce_bytes))
    }

    /// Decrypt ciphertext (with appended tag) with AES-256-GCM.
    fn open(&self, nonce_bytes: &[u8; 12], ciphertext: &[u8]) -> Result<Vec<u8>, ShroudError> {
        let unbound = UnboundKey::new(&AES_256_GCM, &*self.key)
            .map_err(|_| ShroudError::Crypto("failed to create AES-256-GCM key".to_string()))?;
        let less_safe = LessSafeKey::new(unbound);

        let nonce = Nonce::assume_unique_for_key(*nonce_bytes);

        let mut in_out = ciphertext.to_vec();
        let plaintext = less_safe
            .open_in_place(nonce, Aad::empty(), &mut in_out)
            .map_err(|_| {
                ShroudError::Crypto(
                    "AES-256-GCM decryption failed -- wrong key or corrupted data".to_string(),
                )
            })?;

        Ok(plaintext.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn encrypt_decrypt_round_trip() {
        let cipher = PayloadCipher::generate().unwrap();
        let payload = cipher.encrypt("an outbound payload").unwrap();
        assert_eq!(cipher.decrypt(&payload).unwrap(), "an outbound payload");
    }

    #[test]
    fn round_trip_empty_string() {
        let cipher = PayloadCipher::generate().unwrap();
        let payload = cipher.encrypt("").unwrap();
        assert_eq!(cipher.decrypt(&payload).unwrap(), "");
    }

    #[test]
    fn round_trip_non_ascii() {
        let cipher = PayloadCipher::generate().unwrap();
        let text = "crème brûlée 日本語 🔐";
        let payload = cipher.encrypt(text).unwrap();
        assert_eq!(cipher.decrypt(&payload).unwrap(), text);
    }

    #[test]
    fn same_plaintext_yields_different_ciphertext() {
        let cipher = PayloadCipher::generate().unwrap();
        let a = cipher.encrypt("same input twice").unwrap();
        let b = cipher.encrypt("same input twice").unwrap();
        // Random nonces should differ, and so should ciphertext.
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn decrypt_with_wrong_key_fails() {
        let cipher = PayloadCipher::generate().unwrap();
        let other = PayloadCipher::generate().unwrap();
        let payload = cipher.encrypt("secret data").unwrap();
        assert!(other.decrypt(&payload).is_err());
    }

    #[test]
    fn tampered_ciphertext_fails_decryption() {
        let cipher = PayloadCipher::generate().unwrap();
        let mut payload = cipher.encrypt("do not tamper").unwrap();
        let mut raw = B64.decode(&payload.ciphertext).unwrap();
        raw[0] ^= 0x01;
        payload.ciphertext = B64.encode(raw);
        assert!(cipher.decrypt(&payload).is_err());
    }

    #[test]
    fn unknown_envelope_version_is_rejected() {
        let cipher = PayloadCipher::generate().unwrap();
        let mut payload = cipher.encrypt("hello").unwrap();
        payload.version = 2;
        assert!(cipher.decrypt(&payload).is_err());
    }

    proptest! {
        #[test]
        fn round_trip_arbitrary_strings(text in ".*") {
            let cipher = PayloadCipher::new([7u8; 32]);
            let payload = cipher.encrypt(&text).unwrap();
            prop_assert_eq!(cipher.decrypt(&payload).unwrap(), text);
        }
    }
}
