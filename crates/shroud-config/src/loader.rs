// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shroud.toml` > `~/.config/shroud/shroud.toml` >
//! `/etc/shroud/shroud.toml` with environment variable overrides via the
//! `SHROUD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ShroudConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shroud/shroud.toml` (system-wide)
/// 3. `~/.config/shroud/shroud.toml` (user XDG config)
/// 4. `./shroud.toml` (local directory)
/// 5. `SHROUD_*` environment variables
pub fn load_config() -> Result<ShroudConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShroudConfig::default()))
        .merge(Toml::file("/etc/shroud/shroud.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("shroud/shroud.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("shroud.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<ShroudConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShroudConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShroudConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShroudConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SHROUD_PRIVACY_MASK_PII` must map to
/// `privacy.mask_pii`, not `privacy.mask.pii`.
fn env_provider() -> Env {
    Env::prefixed("SHROUD_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: SHROUD_VAULT_SSL_VERIFY -> "vault_ssl_verify"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("privacy_", "privacy.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("proxy_", "proxy.", 1)
            .replacen("overlay_", "overlay.", 1)
            .replacen("vault_", "vault.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_str_applies_defaults() {
        let config = load_config_from_str("").unwrap();
        assert!(!config.privacy.mask_pii);
        assert_eq!(config.vault.mount, "secret");
    }

    #[test]
    fn load_from_str_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[privacy]
mask_pii = true
encrypt_payloads = true

[proxy]
endpoints = ["http://proxy-1:8080", "http://proxy-2:8080"]
"#,
        )
        .unwrap();
        assert!(config.privacy.mask_pii);
        assert!(config.privacy.encrypt_payloads);
        assert_eq!(config.proxy.endpoints.len(), 2);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(load_config_from_str("privacy = [not toml").is_err());
    }

    #[test]
    fn env_vars_map_underscored_keys_to_sections() {
        // SHROUD_PRIVACY_MASK_PII must land on privacy.mask_pii, not
        // privacy.mask.pii; same for vault.ssl_verify.
        figment::Jail::expect_with(|jail| {
            jail.create_file("shroud.toml", "")?;
            jail.set_env("SHROUD_PRIVACY_MASK_PII", "true");
            jail.set_env("SHROUD_VAULT_SSL_VERIFY", "false");

            let config = load_config_from_path(Path::new("shroud.toml"))?;
            assert!(config.privacy.mask_pii);
            assert!(!config.vault.ssl_verify);
            Ok(())
        });
    }

    #[test]
    fn env_var_overrides_toml_value() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "shroud.toml",
                r#"
[vault]
url = "http://from-toml:8200"
"#,
            )?;
            jail.set_env("SHROUD_VAULT_URL", "http://from-env:8200");

            let config = load_config_from_path(Path::new("shroud.toml"))?;
            assert_eq!(config.vault.url, "http://from-env:8200");
            Ok(())
        });
    }
}
