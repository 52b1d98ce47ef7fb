// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Privacy-preserving outbound request gateway.
//!
//! [`PrivacyGateway`] is the single call boundary for outbound requests:
//! it sanitizes, encrypts, and anonymizes per its [`PrivacyConfig`] flags,
//! then executes exactly one transport call through the route the
//! [`routing policy`](routing::TransportRoute) selected at construction.
//!
//! [`PrivacyConfig`]: shroud_config::PrivacyConfig

pub mod gateway;
pub mod routing;
pub mod transport;

pub use gateway::PrivacyGateway;
pub use routing::TransportRoute;
pub use transport::{DirectTransport, OverlayTransport, ProxyTransport};
