//! Error types for quarry
//!
//! This module defines the error type shared by every crate in the workspace.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Contract violations by a driving component (pulling from an exhausted
//! iterator, for example) are not represented here: they panic.

use std::io;
use thiserror::Error;

/// Result type alias for quarry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for quarry
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (metadata files, config files)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Invalid configuration, raised at setup time and never per record
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed expression tree or invalid node surgery request
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Underlying sorted source failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Type metadata could not be loaded or stored
    #[error("Metadata error: {0}")]
    MetadataError(String),
}

impl Error {
    /// Build a configuration error from any displayable message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::ConfigError(msg.into())
    }

    /// Build a serialization error from any displayable message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Error::SerializationError(msg.into())
    }

    /// Build an expression error from any displayable message
    pub fn invalid_expression(msg: impl Into<String>) -> Self {
        Error::InvalidExpression(msg.into())
    }

    /// Build a storage error from any displayable message
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::StorageError(msg.into())
    }

    /// Build a metadata error from any displayable message
    pub fn metadata(msg: impl Into<String>) -> Self {
        Error::MetadataError(msg.into())
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::ConfigError(e.to_string())
    }
}
