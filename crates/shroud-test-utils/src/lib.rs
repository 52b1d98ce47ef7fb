// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles shared across the Shroud workspace: an in-memory
//! [`SecretStore`](shroud_core::SecretStore) and a mock
//! [`Transport`](shroud_core::Transport).

pub mod memory_store;
pub mod mock_transport;

pub use memory_store::MemorySecretStore;
pub use mock_transport::MockTransport;
