//! Property transformers
//!
//! Pure, deterministic functions over property mappings. A transformer takes
//! the raw key-value pairs attached to a secret backend (e.g. the `token`
//! field of a Consul credential) and produces the derived keys a downstream
//! client expects. Keys a transformer does not name are dropped, not copied,
//! unless the transform explicitly forwards them.

use serde_json::Value;

/// Insertion-ordered property mapping with unique keys.
///
/// `serde_json::Map` preserves insertion order with the `preserve_order`
/// feature, so derived keys come out in the order transforms emit them.
pub type PropertyMap = serde_json::Map<String, Value>;

/// A stateless transformation over a property mapping.
///
/// Implementations must be pure: same input, same output, no side effects.
/// Plain closures of type `Fn(&PropertyMap) -> PropertyMap` implement this
/// trait via the blanket impl below.
pub trait PropertyTransformer: Send + Sync {
    /// Transform the input mapping into a new mapping.
    fn transform(&self, input: &PropertyMap) -> PropertyMap;
}

impl<F> PropertyTransformer for F
where
    F: Fn(&PropertyMap) -> PropertyMap + Send + Sync,
{
    fn transform(&self, input: &PropertyMap) -> PropertyMap {
        self(input)
    }
}

/// Identity transformer: forwards every input key unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransformer;

impl PropertyTransformer for NoopTransformer {
    fn transform(&self, input: &PropertyMap) -> PropertyMap {
        input.clone()
    }
}

/// Renames selected keys, dropping everything else.
///
/// A rule table of source-to-target renames. Only keys present in both the
/// rule table and the input appear in the output. This is the general
/// single-target alternative to [`AclTokenFanOut`].
#[derive(Debug, Clone, Default)]
pub struct KeyRenameTransformer {
    rules: Vec<(String, String)>,
}

impl KeyRenameTransformer {
    /// Create a transformer with no rules (output is always empty).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source-to-target rename rule.
    pub fn add_rule(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        self.rules.push((source.into(), target.into()));
        self
    }
}

impl PropertyTransformer for KeyRenameTransformer {
    fn transform(&self, input: &PropertyMap) -> PropertyMap {
        let mut output = PropertyMap::new();
        for (source, target) in &self.rules {
            if let Some(value) = input.get(source) {
                output.insert(target.clone(), value.clone());
            }
        }
        output
    }
}

/// Fans the Consul token out to the two ACL-token keys the Consul client
/// reads.
///
/// Input key `source_key` (normally `token`) maps to both
/// `<prefix>.config.acl-token` and `<prefix>.discovery.acl-token`, set to
/// the same value. An absent or null token produces `null` under both
/// derived keys; downstream consumers must tolerate that. The raw source
/// key never appears in the output.
#[derive(Debug, Clone)]
pub struct AclTokenFanOut {
    prefix: String,
    source_key: String,
}

impl AclTokenFanOut {
    /// Create a fan-out for the given property prefix and source key.
    pub fn new(prefix: impl Into<String>, source_key: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), source_key: source_key.into() }
    }

    /// The two derived keys, in emission order.
    pub fn derived_keys(&self) -> [String; 2] {
        [
            format!("{}.config.acl-token", self.prefix),
            format!("{}.discovery.acl-token", self.prefix),
        ]
    }
}

impl PropertyTransformer for AclTokenFanOut {
    fn transform(&self, input: &PropertyMap) -> PropertyMap {
        let token = input.get(&self.source_key).cloned().unwrap_or(Value::Null);

        let mut output = PropertyMap::new();
        let [config_key, discovery_key] = self.derived_keys();
        output.insert(config_key, token.clone());
        output.insert(discovery_key, token);
        output
    }
}

/// Applies two transformers in sequence, feeding the first's output to the
/// second.
pub struct Chained<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chained<A, B>
where
    A: PropertyTransformer,
    B: PropertyTransformer,
{
    /// Chain `first` then `second`.
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> PropertyTransformer for Chained<A, B>
where
    A: PropertyTransformer,
    B: PropertyTransformer,
{
    fn transform(&self, input: &PropertyMap) -> PropertyMap {
        self.second.transform(&self.first.transform(input))
    }
}
