// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-name sensitivity predicate shared by the redactor and the
//! credential cipher.

/// Markers that flag a field name as carrying secret material.
///
/// Matching is case-insensitive substring: `user_password`, `ApiKey`, and
/// `refresh_token` all match.
const SENSITIVE_MARKERS: &[&str] = &["password", "token", "secret", "key", "apikey", "api_key"];

/// The sentinel written in place of redacted values.
pub const REDACTED: &str = "[REDACTED]";

/// Returns true when the field name indicates secret material.
pub fn is_sensitive_field(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_MARKERS.iter().any(|m| lower.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_markers() {
        for name in [
            "password",
            "user_password",
            "apiKey",
            "api_key",
            "API_KEY",
            "refresh_token",
            "client_secret",
            "ssh_key",
        ] {
            assert!(is_sensitive_field(name), "{name} should be sensitive");
        }
    }

    #[test]
    fn ignores_plain_fields() {
        for name in ["email", "username", "model", "url", "temperature"] {
            assert!(!is_sensitive_field(name), "{name} should not be sensitive");
        }
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        assert!(is_sensitive_field("X-Auth-TOKEN"));
        assert!(is_sensitive_field("PaSsWoRd_hash"));
    }
}
