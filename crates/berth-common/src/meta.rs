//! Engine-facing metadata types.
//!
//! The composer does not apply anything itself: every composed manifest is
//! wrapped in a [`ResourceRequest`] carrying the options bag the external
//! orchestration engine consumes — provider handle, dependency edges,
//! delete-before-replace, replace-on-changes, and custom timeouts.

use std::collections::BTreeMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Annotation telling the engine not to wait for resource readiness.
pub const ANNOTATION_SKIP_AWAIT: &str = "berth.dev/skip-await";

// =============================================================================
// ObjectMeta
// =============================================================================

/// Standard Kubernetes ObjectMeta for composed resources.
///
/// Used by every manifest type as the unified metadata representation.
/// Automatically adds the `app` and managed-by labels on construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Resource name
    pub name: String,
    /// Resource namespace
    pub namespace: String,
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Annotations
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl ObjectMeta {
    /// Create new metadata with standard berth labels
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let name = name.into();
        let mut labels = BTreeMap::new();
        labels.insert(crate::LABEL_APP.to_string(), name.clone());
        labels.insert(
            crate::LABEL_MANAGED_BY.to_string(),
            crate::LABEL_MANAGED_BY_BERTH.to_string(),
        );
        Self {
            name,
            namespace: namespace.into(),
            labels,
            annotations: BTreeMap::new(),
        }
    }

    /// Add a label
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    /// Add an annotation
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// Mark the resource as exempt from readiness waits
    pub fn skip_await(self) -> Self {
        self.with_annotation(ANNOTATION_SKIP_AWAIT, "true")
    }
}

// =============================================================================
// HasApiResource
// =============================================================================

/// Trait for manifest types with a compile-time known API version and kind.
///
/// Keeps apiVersion/kind consistent between serialization and the engine's
/// resource registration.
pub trait HasApiResource {
    /// Full API version (e.g., "apps/v1", "v1")
    const API_VERSION: &'static str;
    /// Resource kind (e.g., "Deployment")
    const KIND: &'static str;
}

// =============================================================================
// Provider handle and resource options
// =============================================================================

/// Opaque handle identifying the engine provider a resource belongs to
/// (i.e., which cluster/connection applies it).
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProviderHandle {
    /// Provider name as registered with the engine
    pub name: String,
}

impl ProviderHandle {
    /// Create a handle for a named provider
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for ProviderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Reference to another resource in the composition graph, used for
/// dependency edges.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    /// Resource kind (e.g., "Deployment")
    pub kind: String,
    /// Resource name
    pub name: String,
}

impl ResourceRef {
    /// Create a reference to a resource by kind and name
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Custom create/update/delete timeouts passed through to the engine.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomTimeouts {
    /// Create timeout (e.g., "1m")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<String>,
    /// Update timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    /// Delete timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
}

impl CustomTimeouts {
    /// One-minute create/update timeouts, the default for workloads
    pub fn one_minute_apply() -> Self {
        Self {
            create: Some("1m".to_string()),
            update: Some("1m".to_string()),
            delete: None,
        }
    }
}

/// Options bag attached to every composed resource, consumed by the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceOptions {
    /// Provider applying the resource
    pub provider: ProviderHandle,
    /// Resources that must exist before this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<ResourceRef>,
    /// Delete the old resource before creating the replacement
    #[serde(default)]
    pub delete_before_replace: bool,
    /// Field paths whose change forces a replacement ("*" for any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replace_on_changes: Vec<String>,
    /// Custom apply timeouts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_timeouts: Option<CustomTimeouts>,
}

impl ResourceOptions {
    /// Options with a provider and no other settings
    pub fn new(provider: ProviderHandle) -> Self {
        Self {
            provider,
            depends_on: Vec::new(),
            delete_before_replace: false,
            replace_on_changes: Vec::new(),
            custom_timeouts: None,
        }
    }

    /// Add dependency edges
    pub fn with_depends_on(mut self, refs: impl IntoIterator<Item = ResourceRef>) -> Self {
        self.depends_on.extend(refs);
        self
    }

    /// Request delete-before-replace semantics
    pub fn delete_before_replace(mut self) -> Self {
        self.delete_before_replace = true;
        self
    }
}

/// A composed manifest paired with its engine options.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResourceRequest<T> {
    /// The manifest value
    pub resource: T,
    /// Engine options (provider, dependency edges, replacement policy)
    pub options: ResourceOptions,
}

impl<T> ResourceRequest<T> {
    /// Pair a manifest with its options
    pub fn new(resource: T, options: ResourceOptions) -> Self {
        Self { resource, options }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_meta_gets_management_labels() {
        let meta = ObjectMeta::new("api", "prod");
        assert_eq!(meta.labels.get(crate::LABEL_APP), Some(&"api".to_string()));
        assert_eq!(
            meta.labels.get(crate::LABEL_MANAGED_BY),
            Some(&crate::LABEL_MANAGED_BY_BERTH.to_string())
        );
    }

    #[test]
    fn skip_await_sets_the_annotation() {
        let meta = ObjectMeta::new("api", "prod").skip_await();
        assert_eq!(
            meta.annotations.get(ANNOTATION_SKIP_AWAIT),
            Some(&"true".to_string())
        );
    }

    #[test]
    fn resource_ref_displays_kind_and_name() {
        assert_eq!(
            ResourceRef::new("Service", "api").to_string(),
            "Service/api"
        );
    }

    #[test]
    fn options_builder_accumulates_edges() {
        let opts = ResourceOptions::new(ProviderHandle::new("k8s"))
            .with_depends_on([ResourceRef::new("ConfigMap", "api-config")])
            .delete_before_replace();
        assert_eq!(opts.depends_on.len(), 1);
        assert!(opts.delete_before_replace);
    }
}
