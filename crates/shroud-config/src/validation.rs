// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes: URLs must parse, timeouts must be positive, and routing
//! flags must have the collaborator endpoints they imply.

use crate::diagnostic::ConfigError;
use crate::model::ShroudConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast on the first).
pub fn validate_config(config: &ShroudConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.gateway.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "gateway.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.vault.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "vault.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.vault.url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.url must not be empty".to_string(),
        });
    } else if url::Url::parse(config.vault.url.trim()).is_err() {
        errors.push(ConfigError::Validation {
            message: format!("vault.url `{}` is not a valid URL", config.vault.url),
        });
    }

    if config.vault.mount.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "vault.mount must not be empty".to_string(),
        });
    }

    // Proxy routing needs at least one endpoint to rotate through.
    if config.privacy.anonymize_requests
        && !config.privacy.route_through_tor
        && config.proxy.endpoints.is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "privacy.anonymize_requests requires at least one proxy.endpoints entry"
                .to_string(),
        });
    }

    for endpoint in &config.proxy.endpoints {
        if url::Url::parse(endpoint).is_err() {
            errors.push(ConfigError::Validation {
                message: format!("proxy endpoint `{endpoint}` is not a valid URL"),
            });
        }
    }

    if config.privacy.route_through_tor && config.overlay.socks_addr.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "privacy.route_through_tor requires overlay.socks_addr".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = ShroudConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = ShroudConfig::default();
        config.gateway.request_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("request_timeout_secs"))
        ));
    }

    #[test]
    fn proxy_routing_without_endpoints_fails() {
        let mut config = ShroudConfig::default();
        config.privacy.anonymize_requests = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("proxy.endpoints"))
        ));
    }

    #[test]
    fn overlay_routing_does_not_require_proxy_endpoints() {
        let mut config = ShroudConfig::default();
        config.privacy.anonymize_requests = true;
        config.privacy.route_through_tor = true;
        // Overlay wins the route, so the empty proxy pool is fine.
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn overlay_routing_without_socks_addr_fails() {
        let mut config = ShroudConfig::default();
        config.privacy.route_through_tor = true;
        config.overlay.socks_addr = "  ".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("overlay.socks_addr"))
        ));
    }

    #[test]
    fn invalid_vault_url_fails() {
        let mut config = ShroudConfig::default();
        config.vault.url = "not a url".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("vault.url"))
        ));
    }

    #[test]
    fn invalid_proxy_endpoint_fails() {
        let mut config = ShroudConfig::default();
        config.proxy.endpoints = vec!["http://ok:8080".to_string(), "::bad::".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("::bad::"))
        ));
    }

    #[test]
    fn multiple_errors_are_all_collected() {
        let mut config = ShroudConfig::default();
        config.gateway.request_timeout_secs = 0;
        config.vault.url = String::new();
        config.privacy.anonymize_requests = true;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
