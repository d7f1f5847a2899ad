//! Error types for secret backend metadata resolution.

use thiserror::Error;

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur while resolving secret backend metadata.
///
/// The resolution core itself only ever produces [`BridgeError::InvalidDescriptor`];
/// it performs no I/O and never retries. [`BridgeError::Config`] belongs to the
/// environment-loading layer that assembles descriptors at startup.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Descriptor was missing, of an unregistered kind, or of the wrong
    /// runtime type for the factory asked to handle it.
    #[error("Invalid descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    /// Configuration error while loading or validating bridge settings.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl BridgeError {
    /// Create an invalid descriptor error.
    pub fn invalid_descriptor(reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor { reason: reason.into() }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config { message: message.into() }
    }
}

impl From<validator::ValidationErrors> for BridgeError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidDescriptor { reason: errors.to_string() }
    }
}
