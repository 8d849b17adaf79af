//! Style error types
//!
//! Animation state queries never fail; they answer with inert defaults.
//! Errors only arise around configuration.

use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read animation config: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML
    #[error("Failed to parse animation config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Well-formed but out of range
    #[error("Invalid animation config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
