//! Configuration loading for the bridge.
//!
//! Descriptors are assembled from `VAULT_BRIDGE_*` environment variables at
//! startup and validated before the registry is populated. A property
//! loader that consumes files instead can deserialize [`BridgeConfig`]
//! directly; every field carries a serde default.

use crate::descriptor::ConsulDescriptor;
use crate::error::{BridgeError, Result};
use crate::types::SecretString;
use serde::{Deserialize, Serialize};

/// Top-level bridge configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Consul secret backend descriptor.
    pub consul: ConsulDescriptor,
}

impl BridgeConfig {
    /// Create configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `VAULT_BRIDGE_CONSUL_ENABLED` (default `true`)
    /// - `VAULT_BRIDGE_CONSUL_BACKEND` (default `consul`)
    /// - `VAULT_BRIDGE_CONSUL_ROLE` (required when enabled)
    /// - `VAULT_BRIDGE_CONSUL_TOKEN_PROPERTY` (default `token`)
    /// - `VAULT_BRIDGE_CONSUL_PROPERTY_PREFIX` (default `spring.cloud.consul`)
    /// - `VAULT_BRIDGE_CONSUL_TOKEN` (optional pre-shared token)
    pub fn from_env() -> Result<Self> {
        let enabled = match std::env::var("VAULT_BRIDGE_CONSUL_ENABLED") {
            Ok(value) => value.parse().map_err(|_| {
                BridgeError::config(format!(
                    "Invalid VAULT_BRIDGE_CONSUL_ENABLED value '{}', expected true or false",
                    value
                ))
            })?,
            Err(_) => true,
        };

        let defaults = ConsulDescriptor::default();
        let consul = ConsulDescriptor {
            enabled,
            backend: env_or("VAULT_BRIDGE_CONSUL_BACKEND", &defaults.backend),
            role: std::env::var("VAULT_BRIDGE_CONSUL_ROLE").unwrap_or_default(),
            token_property: env_or("VAULT_BRIDGE_CONSUL_TOKEN_PROPERTY", &defaults.token_property),
            property_prefix: env_or(
                "VAULT_BRIDGE_CONSUL_PROPERTY_PREFIX",
                &defaults.property_prefix,
            ),
            token: std::env::var("VAULT_BRIDGE_CONSUL_TOKEN").ok().map(SecretString::from),
        };

        let config = Self { consul };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// Disabled backends are left unvalidated so a partially configured
    /// environment does not block startup.
    pub fn validate(&self) -> Result<()> {
        if self.consul.enabled && self.consul.role.is_empty() {
            return Err(BridgeError::config(
                "VAULT_BRIDGE_CONSUL_ROLE must be set when the Consul backend is enabled",
            ));
        }
        if self.consul.enabled {
            self.consul.clone().validated()?;
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
