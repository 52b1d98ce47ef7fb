// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Leaf privacy components for the Shroud gateway and vault.
//!
//! Provides PII redaction, AES-256-GCM payload encryption, field-selective
//! credential encryption, and request header anonymization. These components
//! are pure and hold no network or storage state.

pub mod cipher;
pub mod credential;
pub mod headers;
pub mod redact;
pub mod sensitive;

pub use cipher::{EncryptedPayload, PayloadCipher};
pub use credential::CredentialCipher;
pub use headers::HeaderAnonymizer;
pub use redact::PiiRedactor;
pub use sensitive::{is_sensitive_field, REDACTED};
