//! Secret backend metadata
//!
//! The output unit of resolution: a backend mount path plus the property
//! overlay a downstream configuration merger applies on top of the
//! application's effective property set. The merge itself happens elsewhere.

use crate::transform::PropertyMap;
use serde::Serialize;

/// Resolved metadata for a secret backend.
///
/// Immutable once produced. Two resolutions of equal descriptors compare
/// equal by value even though they are distinct allocations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecretBackendMetadata {
    name: String,
    path: String,
    overlay: PropertyMap,
}

impl SecretBackendMetadata {
    /// Create metadata for a backend.
    pub fn new(name: impl Into<String>, path: impl Into<String>, overlay: PropertyMap) -> Self {
        Self { name: name.into(), path: path.into(), overlay }
    }

    /// Backend name (e.g. `"consul"`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backend mount path credentials are read from (e.g. `"consul/creds/readonly"`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The transformed property overlay, in emission order.
    pub fn property_overlay(&self) -> &PropertyMap {
        &self.overlay
    }

    /// Consume the metadata and return the overlay.
    pub fn into_overlay(self) -> PropertyMap {
        self.overlay
    }
}
