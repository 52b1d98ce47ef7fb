// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Shroud privacy gateway and credential vault.
//!
//! This crate provides the shared error type, the request/response types
//! exchanged with transports, and the collaborator traits ([`Transport`],
//! [`SecretStore`]) that the gateway and vault crates build on.

pub mod error;
pub mod traits;
pub mod types;

pub use error::ShroudError;
pub use traits::{SecretStore, Transport};
pub use types::{Method, TransportRequest, TransportResponse};
