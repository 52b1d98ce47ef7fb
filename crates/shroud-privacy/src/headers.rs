// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anonymization of fingerprinting-prone request headers.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;

/// User-Agent rotation pool. Values are common desktop browser strings so an
/// anonymized request blends in rather than standing out.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
];

/// Canonical Accept-Language forced on anonymized requests.
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Overwrites fingerprinting-prone headers when enabled.
///
/// Only `User-Agent` and `Accept-Language` are touched. Caller-supplied
/// authorization headers are never removed.
#[derive(Debug, Clone, Copy)]
pub struct HeaderAnonymizer {
    enabled: bool,
}

impl HeaderAnonymizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Returns a copy of `headers` with `User-Agent` replaced by a uniformly
    /// random member of the rotation pool and `Accept-Language` forced to the
    /// canonical value. When disabled, headers pass through untouched.
    pub fn anonymize(&self, headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut out = headers.clone();
        if !self.enabled {
            return out;
        }

        // Drop any caller-supplied casing variants of the headers we own.
        out.retain(|name, _| {
            let lower = name.to_lowercase();
            lower != "user-agent" && lower != "accept-language"
        });

        let mut rng = rand::thread_rng();
        let agent = USER_AGENTS
            .choose(&mut rng)
            .copied()
            .unwrap_or(USER_AGENTS[0]);
        out.insert("User-Agent".to_string(), agent.to_string());
        out.insert("Accept-Language".to_string(), ACCEPT_LANGUAGE.to_string());
        out
    }

    /// The fixed rotation pool, exposed so tests assert membership rather
    /// than an exact value.
    pub fn rotation_pool() -> &'static [&'static str] {
        USER_AGENTS
    }
}
