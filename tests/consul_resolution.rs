//! End-to-end resolution tests: registry population, Consul token fan-out,
//! failure modes, and thread safety of shared factories.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::thread;
use vault_bridge::{
    BackendDescriptor, BackendKind, BridgeConfig, BridgeError, ConsulDescriptor,
    ConsulMetadataFactory, EventPublisher, MetadataFactoryRegistry, SecretBackendEvent,
    SecretBackendMetadataFactory,
};

#[derive(Debug, Default)]
struct RecordingPublisher {
    events: Mutex<Vec<SecretBackendEvent>>,
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: &SecretBackendEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn registry() -> MetadataFactoryRegistry {
    let config = BridgeConfig { consul: ConsulDescriptor::new("readonly") };
    MetadataFactoryRegistry::from_config(&config, None).unwrap()
}

#[test]
fn resolves_consul_descriptor_to_acl_token_overlay() {
    let registry = registry();
    let descriptor = ConsulDescriptor::new("readonly").with_token("abc123");

    let metadata = registry.resolve(Some(&descriptor)).unwrap();

    assert_eq!(metadata.name(), "consul");
    assert_eq!(metadata.path(), "consul/creds/readonly");

    let overlay = metadata.property_overlay();
    assert_eq!(overlay.len(), 2);
    assert_eq!(overlay["spring.cloud.consul.config.acl-token"], json!("abc123"));
    assert_eq!(overlay["spring.cloud.consul.discovery.acl-token"], json!("abc123"));
    assert!(!overlay.contains_key("token"));
}

#[test]
fn missing_descriptor_fails_regardless_of_registry_state() {
    let empty = MetadataFactoryRegistry::new();
    assert!(matches!(
        empty.resolve(None).unwrap_err(),
        BridgeError::InvalidDescriptor { .. }
    ));

    let populated = registry();
    assert!(matches!(
        populated.resolve(None).unwrap_err(),
        BridgeError::InvalidDescriptor { .. }
    ));
}

#[test]
fn absent_token_fans_out_as_null() {
    let registry = registry();
    let metadata = registry.resolve(Some(&ConsulDescriptor::new("readonly"))).unwrap();

    let overlay = metadata.property_overlay();
    assert_eq!(overlay["spring.cloud.consul.config.acl-token"], Value::Null);
    assert_eq!(overlay["spring.cloud.consul.discovery.acl-token"], Value::Null);
}

#[test]
fn equal_descriptors_resolve_to_equal_overlays() {
    let registry = registry();
    let first = registry
        .resolve(Some(&ConsulDescriptor::new("readonly").with_token("abc123")))
        .unwrap();
    let second = registry
        .resolve(Some(&ConsulDescriptor::new("readonly").with_token("abc123")))
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.property_overlay(), second.property_overlay());
}

#[test]
fn publisher_sees_one_event_per_resolution() {
    let publisher = Arc::new(RecordingPublisher::default());
    let config = BridgeConfig { consul: ConsulDescriptor::new("readonly") };
    let registry =
        MetadataFactoryRegistry::from_config(&config, Some(publisher.clone())).unwrap();

    registry.resolve(Some(&ConsulDescriptor::new("readonly"))).unwrap();
    registry.resolve(Some(&ConsulDescriptor::new("readwrite"))).unwrap();

    let events = publisher.events.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(
        events[0],
        SecretBackendEvent::MetadataCreated {
            backend: BackendKind::Consul,
            name: "consul".into(),
            path: "consul/creds/readonly".into(),
        }
    );
}

#[test]
fn concurrent_resolutions_do_not_interfere() {
    let factory = Arc::new(ConsulMetadataFactory::new());
    let threads = 16;

    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                let descriptor =
                    ConsulDescriptor::new(format!("role-{i}")).with_token(format!("token-{i}"));
                (i, factory.create_metadata(&descriptor).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (i, metadata) = handle.join().unwrap();
        assert_eq!(metadata.path(), format!("consul/creds/role-{i}"));
        assert_eq!(
            metadata.property_overlay()["spring.cloud.consul.config.acl-token"],
            json!(format!("token-{i}"))
        );
        assert_eq!(
            metadata.property_overlay()["spring.cloud.consul.discovery.acl-token"],
            json!(format!("token-{i}"))
        );
    }
}

#[test]
fn foreign_descriptor_type_is_rejected() {
    #[derive(Debug)]
    struct HomemadeDescriptor;

    impl BackendDescriptor for HomemadeDescriptor {
        fn kind(&self) -> BackendKind {
            BackendKind::Consul
        }
        fn name(&self) -> &str {
            "homemade"
        }
        fn backend_path(&self) -> String {
            "homemade/creds/x".into()
        }
        fn token_property(&self) -> &str {
            "token"
        }
        fn source_properties(&self) -> vault_bridge::PropertyMap {
            vault_bridge::PropertyMap::new()
        }
        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    let registry = registry();
    let err = registry.resolve(Some(&HomemadeDescriptor)).unwrap_err();
    assert!(matches!(err, BridgeError::InvalidDescriptor { .. }));
}

proptest! {
    // Fan-out holds for arbitrary token values and roles: both derived keys
    // carry the token and the raw source key never leaks into the overlay.
    #[test]
    fn fan_out_holds_for_arbitrary_tokens(
        token in "[a-zA-Z0-9_-]{1,64}",
        role in "[a-z][a-z0-9-]{0,31}",
    ) {
        let factory = ConsulMetadataFactory::new();
        let descriptor = ConsulDescriptor::new(role.clone()).with_token(token.clone());

        let metadata = factory.create_metadata(&descriptor).unwrap();
        let overlay = metadata.property_overlay();

        prop_assert_eq!(metadata.path(), format!("consul/creds/{}", role));
        prop_assert_eq!(&overlay["spring.cloud.consul.config.acl-token"], &json!(token));
        prop_assert_eq!(&overlay["spring.cloud.consul.discovery.acl-token"], &json!(token));
        prop_assert!(!overlay.contains_key("token"));
        prop_assert_eq!(overlay.len(), 2);
    }
}
