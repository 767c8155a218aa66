//! Config and secret source resolution.
//!
//! Turns a workload's environment configuration and secret values into at
//! most one ConfigMap and one Secret request, plus the env-from handles the
//! pod template consumes. Names derive from the workload identity, so an
//! unchanged identity keeps the same resource names across passes and the
//! engine can roll values without downtime.

use std::collections::BTreeMap;

use tracing::debug;

use berth_common::error::Error;
use berth_common::naming;
use berth_common::secrets::{SecretStore, SecretValue};
use berth_common::{ProviderHandle, ResourceOptions, ResourceRef, ResourceRequest};

use crate::k8s::{ConfigMap, EnvFromSource, Secret};

/// Resolved config/secret sources for one workload.
#[derive(Debug, Default)]
pub struct ConfigSources {
    /// ConfigMap request, when config values were supplied
    pub config: Option<ResourceRequest<ConfigMap>>,
    /// Secret request, when secret values were supplied
    pub secret: Option<ResourceRequest<Secret>>,
    /// Env-from handles for the pod template, config before secret
    pub env_from: Vec<EnvFromSource>,
}

impl ConfigSources {
    /// Dependency edges dependents must carry towards these sources.
    pub fn refs(&self) -> Vec<ResourceRef> {
        let mut refs = Vec::new();
        if let Some(ref config) = self.config {
            refs.push(ResourceRef::new("ConfigMap", &config.resource.metadata.name));
        }
        if let Some(ref secret) = self.secret {
            refs.push(ResourceRef::new("Secret", &secret.resource.metadata.name));
        }
        refs
    }
}

/// Resolve config/secret inputs into resource requests and env-from handles.
///
/// Store-backed secret values are fetched through `store`; a failed fetch
/// aborts the composition pass.
#[allow(clippy::too_many_arguments)]
pub async fn resolve(
    name: &str,
    namespace: &str,
    config_map: Option<&BTreeMap<String, String>>,
    secrets: Option<&BTreeMap<String, SecretValue>>,
    provider: &ProviderHandle,
    depends_on: &[ResourceRef],
    store: &dyn SecretStore,
) -> Result<ConfigSources, Error> {
    let mut sources = ConfigSources::default();

    if let Some(values) = config_map {
        let cm_name = naming::config_map_name(name);
        debug!(workload = %name, config_map = %cm_name, "resolving config source");
        let mut cm = ConfigMap::new(&cm_name, namespace);
        cm.data = values.clone();
        sources.config = Some(ResourceRequest::new(
            cm,
            ResourceOptions::new(provider.clone())
                .with_depends_on(depends_on.iter().cloned()),
        ));
        sources.env_from.push(EnvFromSource::config_map(cm_name));
    }

    if let Some(values) = secrets {
        let secret_name = naming::secret_name(name);
        debug!(workload = %name, secret = %secret_name, "resolving secret source");
        let mut resolved = BTreeMap::new();
        for (key, value) in values {
            let plaintext = match value {
                SecretValue::Literal(literal) => literal.clone(),
                SecretValue::Store { key: store_key } => store.fetch(store_key).await?,
            };
            resolved.insert(key.clone(), plaintext);
        }
        let mut secret = Secret::new(&secret_name, namespace);
        secret.string_data = resolved;
        sources.secret = Some(ResourceRequest::new(
            secret,
            ResourceOptions::new(provider.clone())
                .with_depends_on(depends_on.iter().cloned()),
        ));
        sources.env_from.push(EnvFromSource::secret(secret_name));
    }

    Ok(sources)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use berth_common::secrets::MemorySecretStore;

    fn provider() -> ProviderHandle {
        ProviderHandle::new("k8s")
    }

    #[tokio::test]
    async fn absent_inputs_yield_no_sources() {
        let sources = resolve("api", "prod", None, None, &provider(), &[], &MemorySecretStore::new())
            .await
            .unwrap();
        assert!(sources.config.is_none());
        assert!(sources.secret.is_none());
        assert!(sources.env_from.is_empty());
        assert!(sources.refs().is_empty());
    }

    #[tokio::test]
    async fn config_values_become_a_config_map() {
        let mut values = BTreeMap::new();
        values.insert("HOST".to_string(), "0.0.0.0".to_string());
        let sources = resolve(
            "api",
            "prod",
            Some(&values),
            None,
            &provider(),
            &[],
            &MemorySecretStore::new(),
        )
        .await
        .unwrap();

        let config = sources.config.expect("config should be set");
        assert_eq!(config.resource.metadata.name, "api-config");
        assert_eq!(config.resource.data.get("HOST"), Some(&"0.0.0.0".to_string()));
        assert_eq!(sources.env_from.len(), 1);
        assert!(sources.env_from[0].config_map_ref.is_some());
    }

    #[tokio::test]
    async fn store_backed_secrets_are_fetched() {
        let mut values = BTreeMap::new();
        values.insert("PASSWORD".to_string(), SecretValue::store("db/prod/password"));
        values.insert("USER".to_string(), SecretValue::literal("svc"));
        let store = MemorySecretStore::new().with("db/prod/password", "hunter2");

        let sources = resolve("api", "prod", None, Some(&values), &provider(), &[], &store)
            .await
            .unwrap();

        let secret = sources.secret.expect("secret should be set");
        assert_eq!(secret.resource.metadata.name, "api-secret");
        assert_eq!(
            secret.resource.string_data.get("PASSWORD"),
            Some(&"hunter2".to_string())
        );
        assert_eq!(
            secret.resource.string_data.get("USER"),
            Some(&"svc".to_string())
        );
    }

    #[tokio::test]
    async fn missing_store_key_aborts() {
        let mut values = BTreeMap::new();
        values.insert("PASSWORD".to_string(), SecretValue::store("db/missing"));

        let err = resolve(
            "api",
            "prod",
            None,
            Some(&values),
            &provider(),
            &[],
            &MemorySecretStore::new(),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("db/missing"));
    }

    #[tokio::test]
    async fn config_handle_precedes_secret_handle() {
        let mut config = BTreeMap::new();
        config.insert("A".to_string(), "1".to_string());
        let mut secrets = BTreeMap::new();
        secrets.insert("B".to_string(), SecretValue::literal("2"));

        let sources = resolve(
            "api",
            "prod",
            Some(&config),
            Some(&secrets),
            &provider(),
            &[],
            &MemorySecretStore::new(),
        )
        .await
        .unwrap();

        assert_eq!(sources.env_from.len(), 2);
        assert!(sources.env_from[0].config_map_ref.is_some());
        assert!(sources.env_from[1].secret_ref.is_some());
        assert_eq!(sources.refs().len(), 2);
    }
}
