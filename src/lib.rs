//! # vault-bridge
//!
//! A framework-independent secret-configuration bridge: given a typed
//! descriptor of a secret backend integration, it produces the
//! backend-specific configuration overlay a Consul (service-registry)
//! client consumes. Vault provisions the credentials; this crate only
//! translates descriptor properties into the derived keys the client
//! expects. HTTP transport to Vault, property-source loading, and the
//! downstream configuration merge are out of scope and belong to the host.
//!
//! ## Architecture
//!
//! ```text
//! BridgeConfig ──► MetadataFactoryRegistry ──► SecretBackendMetadata
//!   (startup)        │                           (mount path + overlay)
//!                    └─ ConsulMetadataFactory
//!                         │
//!                         ├─ AclTokenFanOut (PropertyTransformer)
//!                         └─ EventPublisher (optional)
//! ```
//!
//! A registry is populated explicitly at startup from typed configuration.
//! Resolution dispatches on the descriptor's runtime type and applies a
//! pure property transform; the Consul transform fans the backend token out
//! to both `<prefix>.config.acl-token` and `<prefix>.discovery.acl-token`.
//!
//! ## Example
//!
//! ```rust
//! use vault_bridge::{ConsulDescriptor, ConsulMetadataFactory, SecretBackendMetadataFactory};
//!
//! let factory = ConsulMetadataFactory::new();
//! let descriptor = ConsulDescriptor::new("readonly").with_token("abc123");
//!
//! let metadata = factory.create_metadata(&descriptor)?;
//! assert_eq!(metadata.path(), "consul/creds/readonly");
//! assert_eq!(
//!     metadata.property_overlay()["spring.cloud.consul.config.acl-token"],
//!     serde_json::json!("abc123")
//! );
//! # Ok::<(), vault_bridge::BridgeError>(())
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod events;
pub mod factory;
pub mod metadata;
pub mod registry;
pub mod telemetry;
pub mod transform;
pub mod types;

// Re-export commonly used types and traits
pub use config::BridgeConfig;
pub use descriptor::{BackendDescriptor, BackendKind, ConsulDescriptor};
pub use error::{BridgeError, Result};
pub use events::{EventPublisher, NoopEventPublisher, SecretBackendEvent, TracingEventPublisher};
pub use factory::{ConsulMetadataFactory, SecretBackendMetadataFactory};
pub use metadata::SecretBackendMetadata;
pub use registry::MetadataFactoryRegistry;
pub use telemetry::init_logging;
pub use transform::{
    AclTokenFanOut, Chained, KeyRenameTransformer, NoopTransformer, PropertyMap,
    PropertyTransformer,
};
pub use types::SecretString;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
