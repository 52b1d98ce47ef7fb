// SPDX-FileCopyrightText: 2026 Shroud Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error type with miette diagnostics.
//!
//! Wraps validation failures and figment extraction errors so startup
//! failures render as readable diagnostics rather than a debug dump.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error surfaced at load or validation time.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A semantic validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(shroud::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failure while loading or deserializing configuration sources.
    #[error("failed to load configuration: {0}")]
    #[diagnostic(
        code(shroud::config::load),
        help("check shroud.toml syntax and SHROUD_* environment variables")
    )]
    Load(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(e.to_string())
    }
}
