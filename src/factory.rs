//! Metadata factories
//!
//! A factory turns a descriptor of its supported type into
//! [`SecretBackendMetadata`]. Dispatch is by exact runtime type: `supports`
//! downcasts and accepts nothing else. Factories hold no mutable state, so
//! a shared instance is safe to call from any number of threads.

use crate::descriptor::{BackendDescriptor, BackendKind, ConsulDescriptor};
use crate::error::{BridgeError, Result};
use crate::events::{EventPublisher, SecretBackendEvent};
use crate::metadata::SecretBackendMetadata;
use crate::transform::{AclTokenFanOut, PropertyTransformer};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Factory producing metadata for one backend kind.
pub trait SecretBackendMetadataFactory: Send + Sync + fmt::Debug {
    /// The backend kind this factory serves.
    fn kind(&self) -> BackendKind;

    /// True iff the descriptor's runtime type is the one this factory
    /// handles. Pure, no side effects.
    fn supports(&self, descriptor: &dyn BackendDescriptor) -> bool;

    /// Build metadata for a supported descriptor.
    ///
    /// Fails with [`BridgeError::InvalidDescriptor`] when the descriptor is
    /// of the wrong type. Validation failure is immediate and final; there
    /// are no retries.
    fn create_metadata(&self, descriptor: &dyn BackendDescriptor) -> Result<SecretBackendMetadata>;
}

/// Factory for the Consul secret backend.
///
/// Applies the ACL-token fan-out to the descriptor's source properties and
/// optionally publishes a [`SecretBackendEvent::MetadataCreated`] event.
pub struct ConsulMetadataFactory {
    publisher: Option<Arc<dyn EventPublisher>>,
}

impl ConsulMetadataFactory {
    /// Create a factory without an event publisher.
    pub fn new() -> Self {
        Self { publisher: None }
    }

    /// Create a factory that publishes lifecycle events to the given sink.
    pub fn with_publisher(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher: Some(publisher) }
    }

    /// Whether a publisher is attached.
    pub fn has_publisher(&self) -> bool {
        self.publisher.is_some()
    }

    fn for_consul(&self, properties: &ConsulDescriptor) -> SecretBackendMetadata {
        let transformer = AclTokenFanOut::new(
            properties.property_prefix.as_str(),
            properties.token_property.as_str(),
        );
        let overlay = transformer.transform(&properties.source_properties());

        let metadata =
            SecretBackendMetadata::new(properties.name(), properties.backend_path(), overlay);

        debug!(
            backend = %metadata.name(),
            path = %metadata.path(),
            "Resolved Consul secret backend metadata"
        );

        if let Some(publisher) = &self.publisher {
            publisher.publish(&SecretBackendEvent::MetadataCreated {
                backend: BackendKind::Consul,
                name: metadata.name().to_string(),
                path: metadata.path().to_string(),
            });
        }

        metadata
    }
}

impl Default for ConsulMetadataFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsulMetadataFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsulMetadataFactory")
            .field("publisher", &self.publisher.is_some())
            .finish()
    }
}

impl SecretBackendMetadataFactory for ConsulMetadataFactory {
    fn kind(&self) -> BackendKind {
        BackendKind::Consul
    }

    fn supports(&self, descriptor: &dyn BackendDescriptor) -> bool {
        descriptor.as_any().downcast_ref::<ConsulDescriptor>().is_some()
    }

    fn create_metadata(&self, descriptor: &dyn BackendDescriptor) -> Result<SecretBackendMetadata> {
        let properties = descriptor
            .as_any()
            .downcast_ref::<ConsulDescriptor>()
            .ok_or_else(|| {
                BridgeError::invalid_descriptor(format!(
                    "expected a ConsulDescriptor, got kind '{}'",
                    descriptor.kind()
                ))
            })?;

        Ok(self.for_consul(properties))
    }
}
