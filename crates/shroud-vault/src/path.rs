// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic credential path derivation.
//!
//! A path is derivable purely from the (service, user, credential id) triple
//! plus the configured mount prefix; no other state participates. One path
//! addresses exactly one credential.

/// Builds backend paths of the form
/// `{mount}/credentials/{service}/{user}/{credential_id}`.
#[derive(Debug, Clone)]
pub struct CredentialPathBuilder {
    mount: String,
}

impl CredentialPathBuilder {
    /// Creates a builder under the given mount prefix. A trailing slash on
    /// the mount is accepted and normalized away.
    pub fn new(mount: impl Into<String>) -> Self {
        let mount = mount.into();
        Self {
            mount: mount.trim_end_matches('/').to_string(),
        }
    }

    /// The full path for one credential.
    pub fn credential_path(&self, service: &str, user: &str, credential_id: &str) -> String {
        format!(
            "{}/credentials/{service}/{user}/{credential_id}",
            self.mount
        )
    }

    /// The listing prefix scoping one (service, user) pair, with trailing
    /// slash so sibling users sharing a name prefix never match.
    pub fn scope_prefix(&self, service: &str, user: &str) -> String {
        format!("{}/credentials/{service}/{user}/", self.mount)
    }
}
