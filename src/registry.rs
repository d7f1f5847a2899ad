//! Metadata factory registry
//!
//! Capability table mapping backend kinds to their metadata factories.
//! Populated explicitly at process startup from typed configuration; there
//! is no implicit scanning. Resolution looks the factory up by the
//! descriptor's kind, re-checks `supports`, and delegates.

use crate::config::BridgeConfig;
use crate::descriptor::{BackendDescriptor, BackendKind};
use crate::error::{BridgeError, Result};
use crate::events::EventPublisher;
use crate::factory::{ConsulMetadataFactory, SecretBackendMetadataFactory};
use crate::metadata::SecretBackendMetadata;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of secret backend metadata factories.
///
/// Holds one factory per backend kind behind shared read-only references,
/// so a populated registry is safe to share across threads.
pub struct MetadataFactoryRegistry {
    factories: HashMap<BackendKind, Arc<dyn SecretBackendMetadataFactory>>,
}

impl std::fmt::Debug for MetadataFactoryRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataFactoryRegistry")
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for MetadataFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataFactoryRegistry {
    /// Create a registry with no factories.
    pub fn new() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Register a metadata factory for its backend kind.
    ///
    /// Registering a second factory for the same kind replaces the first.
    pub fn register(&mut self, factory: Arc<dyn SecretBackendMetadataFactory>) {
        let kind = factory.kind();
        info!(backend = %kind, "Registering secret backend metadata factory");
        self.factories.insert(kind, factory);
    }

    /// Check if a factory is registered for the given kind.
    pub fn has_factory(&self, kind: BackendKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Get the list of registered backend kinds.
    pub fn registered_kinds(&self) -> Vec<BackendKind> {
        self.factories.keys().copied().collect()
    }

    /// Populate a registry from typed configuration.
    ///
    /// Registers a factory per enabled backend; disabled backends are
    /// skipped with a debug log. The optional publisher is handed to every
    /// registered factory.
    pub fn from_config(
        config: &BridgeConfig,
        publisher: Option<Arc<dyn EventPublisher>>,
    ) -> Result<Self> {
        let mut registry = Self::new();

        if config.consul.enabled {
            config.consul.clone().validated()?;
            let factory = match publisher {
                Some(publisher) => ConsulMetadataFactory::with_publisher(publisher),
                None => ConsulMetadataFactory::new(),
            };
            registry.register(Arc::new(factory));
        } else {
            debug!("Consul backend disabled, skipping factory registration");
        }

        Ok(registry)
    }

    /// Resolve a descriptor into backend metadata.
    ///
    /// `None` fails immediately with [`BridgeError::InvalidDescriptor`],
    /// regardless of registry state. A registered factory must also pass
    /// its `supports` check before it is asked to create metadata.
    pub fn resolve(
        &self,
        descriptor: Option<&dyn BackendDescriptor>,
    ) -> Result<SecretBackendMetadata> {
        let descriptor = descriptor
            .ok_or_else(|| BridgeError::invalid_descriptor("descriptor must not be missing"))?;

        let factory = self.factories.get(&descriptor.kind()).ok_or_else(|| {
            BridgeError::invalid_descriptor(format!(
                "no factory registered for backend kind '{}'",
                descriptor.kind()
            ))
        })?;

        if !factory.supports(descriptor) {
            return Err(BridgeError::invalid_descriptor(format!(
                "factory for kind '{}' does not support descriptor '{}'",
                descriptor.kind(),
                descriptor.name()
            )));
        }

        factory.create_metadata(descriptor)
    }
}
