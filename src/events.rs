//! Lifecycle events
//!
//! An optional capability the host environment can supply to observe
//! metadata creation. Publishing is infallible and side-effect only; a
//! factory without a publisher skips it silently.

use crate::descriptor::BackendKind;
use tracing::info;

/// Events emitted by the resolution engine.
///
/// Events carry backend identity only, never token material.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretBackendEvent {
    /// Metadata was created for a backend.
    MetadataCreated {
        backend: BackendKind,
        name: String,
        path: String,
    },
}

/// Sink for lifecycle events.
pub trait EventPublisher: Send + Sync {
    /// Publish an event. Must not block or fail.
    fn publish(&self, event: &SecretBackendEvent);
}

/// Publisher that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventPublisher;

impl EventPublisher for NoopEventPublisher {
    fn publish(&self, _event: &SecretBackendEvent) {}
}

/// Publisher that logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl EventPublisher for TracingEventPublisher {
    fn publish(&self, event: &SecretBackendEvent) {
        match event {
            SecretBackendEvent::MetadataCreated { backend, name, path } => {
                info!(backend = %backend, name = %name, path = %path, "Secret backend metadata created");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_publisher_discards() {
        let event = SecretBackendEvent::MetadataCreated {
            backend: BackendKind::Consul,
            name: "consul".into(),
            path: "consul/creds/readonly".into(),
        };
        // Must not panic or block.
        NoopEventPublisher.publish(&event);
        TracingEventPublisher.publish(&event);
    }

    #[test]
    fn test_event_equality() {
        let make = || SecretBackendEvent::MetadataCreated {
            backend: BackendKind::Consul,
            name: "consul".into(),
            path: "consul/creds/r".into(),
        };
        assert_eq!(make(), make());
    }
}
