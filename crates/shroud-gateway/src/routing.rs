// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport route selection.
//!
//! The route is a pure function of the privacy configuration, chosen once
//! per gateway instance. There is no per-request override.

use shroud_config::PrivacyConfig;

/// The three outbound transport variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportRoute {
    /// Plain outbound connection.
    Direct,
    /// Rotating proxy pool.
    Proxy,
    /// Multi-hop anonymizing overlay (Tor).
    AnonymizingOverlay,
}

impl TransportRoute {
    /// Selects the route for a gateway instance.
    ///
    /// The overlay has the highest priority: with both `route_through_tor`
    /// and `anonymize_requests` set, the overlay always wins.
    pub fn select(privacy: &PrivacyConfig) -> Self {
        if privacy.route_through_tor {
            TransportRoute::AnonymizingOverlay
        } else if privacy.anonymize_requests {
            TransportRoute::Proxy
        } else {
            TransportRoute::Direct
        }
    }
}

impl std::fmt::Display for TransportRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TransportRoute::Direct => "direct",
            TransportRoute::Proxy => "proxy",
            TransportRoute::AnonymizingOverlay => "overlay",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn privacy(anonymize: bool, tor: bool) -> PrivacyConfig {
        PrivacyConfig {
            anonymize_requests: anonymize,
            route_through_tor: tor,
            ..Default::default()
        }
    }

    #[test]
    fn defaults_to_direct() {
        assert_eq!(
            TransportRoute::select(&privacy(false, false)),
            TransportRoute::Direct
        );
    }

    #[test]
    fn anonymize_selects_proxy() {
        assert_eq!(
            TransportRoute::select(&privacy(true, false)),
            TransportRoute::Proxy
        );
    }

    #[test]
    fn tor_selects_overlay() {
        assert_eq!(
            TransportRoute::select(&privacy(false, true)),
            TransportRoute::AnonymizingOverlay
        );
    }

    #[test]
    fn overlay_beats_proxy_when_both_set() {
        assert_eq!(
            TransportRoute::select(&privacy(true, true)),
            TransportRoute::AnonymizingOverlay
        );
    }
}
