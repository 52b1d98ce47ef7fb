// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Encrypted credential vault.
//!
//! [`SecureVault`] provides CRUD over per-user, per-service credentials.
//! Field values matching the sensitivity predicate are encrypted before they
//! reach the backend; paths are derived deterministically by
//! [`CredentialPathBuilder`]; the backend itself is any
//! [`SecretStore`](shroud_core::SecretStore), with [`HttpSecretStore`] as
//! the remote HTTP implementation.

pub mod http;
pub mod path;
pub mod vault;

pub use http::HttpSecretStore;
pub use path::CredentialPathBuilder;
pub use vault::SecureVault;
