// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the core delegates to.
//!
//! The gateway and vault own no network or storage machinery of their own;
//! everything outbound goes through these seams so tests can substitute
//! in-memory implementations.

pub mod secrets;
pub mod transport;

pub use secrets::SecretStore;
pub use transport::Transport;
