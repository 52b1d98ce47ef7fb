// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Shroud workspace.
//!
//! Layered TOML + environment loading via Figment, typed models with
//! `deny_unknown_fields`, and collect-all semantic validation.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::ConfigError;
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{
    GatewayConfig, OverlayConfig, PrivacyConfig, ProxyConfig, ShroudConfig, VaultConfig,
};
pub use validation::validate_config;
