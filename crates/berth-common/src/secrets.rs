//! Secret values and the async store boundary.
//!
//! Secret values in a workload spec are either inline literals or references
//! into an external store (vault path, encrypted blob id). The variant is
//! decided where the spec is constructed; nothing downstream inspects shapes.
//! Store-backed values are fetched through [`SecretStore`] before the Secret
//! resource is emitted — a failed fetch aborts the composition pass.

use std::collections::BTreeMap;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A secret value: inline, or a key into an external store.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SecretValue {
    /// Inline literal value
    Literal(String),
    /// Key resolved through the configured [`SecretStore`]
    Store {
        /// Store key (e.g., a vault path)
        key: String,
    },
}

impl SecretValue {
    /// Inline literal value
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Store-backed value
    pub fn store(key: impl Into<String>) -> Self {
        Self::Store { key: key.into() }
    }
}

/// Async boundary to whatever holds secret material at composition time.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetch the plaintext value for a store key.
    async fn fetch(&self, key: &str) -> Result<String, Error>;
}

/// In-memory store for tests and local composition runs.
#[derive(Clone, Debug, Default)]
pub struct MemorySecretStore {
    values: BTreeMap<String, String>,
}

impl MemorySecretStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key/value pair
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl SecretStore for MemorySecretStore {
    async fn fetch(&self, key: &str) -> Result<String, Error> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| Error::secret_resolution(key, "key not present in store"))
    }
}

// =============================================================================
// Tests
// =============================================================================
