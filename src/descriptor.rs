//! Backend descriptors
//!
//! Typed, validated descriptions of a secret backend integration. A
//! descriptor is constructed from configuration at startup and read-only
//! thereafter; factories dispatch on its runtime type via [`BackendDescriptor::as_any`].

use crate::error::Result;
use crate::transform::PropertyMap;
use crate::types::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Kind of secret backend a descriptor targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Consul service-registry/config backend (ACL token provisioning).
    Consul,
}

impl BackendKind {
    /// Get the string representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consul => "consul",
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "consul" => Ok(Self::Consul),
            _ => Err(format!("Unknown backend kind: {}", s)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A typed description of a secret backend integration.
///
/// Implementations must be immutable after construction so descriptors can
/// be shared freely across threads.
pub trait BackendDescriptor: Send + Sync + fmt::Debug {
    /// The backend kind this descriptor targets.
    fn kind(&self) -> BackendKind;

    /// Human-readable backend name (e.g. `"consul"`).
    fn name(&self) -> &str;

    /// The backend mount path credentials are read from.
    fn backend_path(&self) -> String;

    /// The source key under which the token appears in the raw property
    /// mapping.
    fn token_property(&self) -> &str;

    /// The raw key-value pairs this descriptor supplies to transformers.
    fn source_properties(&self) -> PropertyMap;

    /// Runtime-type dispatch seam for `supports` checks.
    fn as_any(&self) -> &dyn Any;
}

fn default_backend() -> String {
    "consul".to_string()
}

fn default_token_property() -> String {
    "token".to_string()
}

fn default_property_prefix() -> String {
    "spring.cloud.consul".to_string()
}

fn default_enabled() -> bool {
    true
}

/// Descriptor for the Consul secret backend.
///
/// Credentials live at `<backend>/creds/<role>`; the token they carry is
/// fanned out to the Consul client's config and discovery ACL-token keys
/// under `property_prefix`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ConsulDescriptor {
    /// Whether the Consul integration is enabled.
    pub enabled: bool,

    /// Mount path of the Consul secret backend.
    #[validate(length(min = 1, message = "backend mount must not be empty"))]
    pub backend: String,

    /// Role name credentials are issued for.
    #[validate(length(min = 1, message = "role must not be empty"))]
    pub role: String,

    /// Source key carrying the token in the raw property mapping.
    #[validate(length(min = 1, message = "token property must not be empty"))]
    pub token_property: String,

    /// Prefix for the derived ACL-token keys.
    #[validate(length(min = 1, message = "property prefix must not be empty"))]
    pub property_prefix: String,

    /// Pre-shared token, if one was provisioned out of band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<SecretString>,
}

impl Default for ConsulDescriptor {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            backend: default_backend(),
            role: String::new(),
            token_property: default_token_property(),
            property_prefix: default_property_prefix(),
            token: None,
        }
    }
}

impl ConsulDescriptor {
    /// Create a descriptor for the given role with default mount and keys.
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), ..Self::default() }
    }

    /// Attach a pre-shared token.
    pub fn with_token(mut self, token: impl Into<SecretString>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Validate field constraints.
    pub fn validated(self) -> Result<Self> {
        Validate::validate(&self)?;
        Ok(self)
    }
}

impl BackendDescriptor for ConsulDescriptor {
    fn kind(&self) -> BackendKind {
        BackendKind::Consul
    }

    fn name(&self) -> &str {
        "consul"
    }

    fn backend_path(&self) -> String {
        format!("{}/creds/{}", self.backend, self.role)
    }

    fn token_property(&self) -> &str {
        &self.token_property
    }

    fn source_properties(&self) -> PropertyMap {
        let mut properties = PropertyMap::new();
        let token = match &self.token {
            Some(token) => Value::String(token.expose_secret().to_string()),
            None => Value::Null,
        };
        properties.insert(self.token_property.clone(), token);
        properties
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
