//! `WorkloadSpec` — the top-level configuration unit the composer consumes.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::meta::{ProviderHandle, ResourceRef};
use crate::secrets::SecretValue;

use super::ingress::IngressConfig;
use super::job::JobConfig;
use super::pod::PodConfig;
use super::scaling::AutoscaleConfig;
use super::toggle::Toggle;
use super::validate_dns_label;

/// Top-level workload specification.
///
/// One evaluation of this spec derives the full dependent resource set:
/// config/secret sources, the primary workload, batch jobs, the service,
/// the ingress binding, and the autoscaler. Name and namespace are the
/// workload's identity — re-invoking with a changed name is a new logical
/// workload, not a mutation of an existing one.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadSpec {
    /// Workload name
    pub name: String,

    /// Target namespace
    pub namespace: String,

    /// Pod configuration
    pub pod: PodConfig,

    /// Primary workload section; `Toggle::disabled()` suppresses the
    /// deployment (and with it service/ingress/autoscaler)
    #[serde(default)]
    pub deployment: Toggle<DeploymentConfig>,

    /// Service section; `Toggle::disabled()` suppresses service creation
    #[serde(default)]
    pub service: Toggle<ServiceConfig>,

    /// Batch jobs and cron jobs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<JobConfig>,

    /// Ingress binding (requires a service)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress: Option<IngressConfig>,

    /// Environment configuration values, emitted as a ConfigMap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<BTreeMap<String, String>>,

    /// Environment secret values, emitted as a Secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secrets: Option<BTreeMap<String, SecretValue>>,

    /// Mount the config source as a volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_config_to_volume: Option<VolumeMapping>,

    /// Mount the secret source as a volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_secrets_to_volume: Option<VolumeMapping>,

    /// Horizontal autoscaling bounds for the primary workload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoscale: Option<AutoscaleConfig>,

    /// Engine provider owning the composed resources
    pub provider: ProviderHandle,

    /// Upstream resources the workload depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<ResourceRef>,
}

impl WorkloadSpec {
    /// Validate the whole specification
    pub fn validate(&self) -> Result<(), Error> {
        validate_dns_label(&self.name, "workload name")?;
        validate_dns_label(&self.namespace, "namespace")?;
        self.pod.validate()?;

        let mut seen_jobs = std::collections::HashSet::new();
        for job in &self.jobs {
            job.validate()?;
            if !seen_jobs.insert(job.name.as_str()) {
                return Err(Error::validation_for_field(
                    "jobs",
                    format!("duplicate job name: {}", job.name),
                ));
            }
        }

        if let Some(ref ingress) = self.ingress {
            ingress.validate()?;
        }
        if let Some(ref autoscale) = self.autoscale {
            autoscale.validate()?;
        }

        Ok(())
    }
}

/// Primary workload (deployment) options
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentConfig {
    /// Container args
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Replica count (defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,

    /// Schedule onto virtual-host (burst-capacity) nodes; jobs inherit this
    /// unless they override it
    #[serde(default)]
    pub use_virtual_host: bool,

    /// Force rolling replacement on every composition pass
    #[serde(default)]
    pub enforce_redeployment: bool,
}

/// Service options
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Expose a single declared port under its container port instead of 80
    #[serde(default)]
    pub use_pod_port: bool,

    /// Publish the service as type LoadBalancer
    #[serde(default)]
    pub load_balancer: bool,
}

/// Volume mapping for the config or secret source
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMapping {
    /// Volume name
    pub name: String,
    /// Mount path
    pub path: String,
    /// Sub path within the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::job::{ConcurrencyPolicy, CronConfig};

    fn sample_spec() -> WorkloadSpec {
        WorkloadSpec {
            name: "api".to_string(),
            namespace: "prod".to_string(),
            pod: PodConfig {
                image: "registry.example.com/api:1.2.3".to_string(),
                ..Default::default()
            },
            deployment: Toggle::default(),
            service: Toggle::default(),
            jobs: Vec::new(),
            ingress: None,
            config_map: None,
            secrets: None,
            map_config_to_volume: None,
            map_secrets_to_volume: None,
            autoscale: None,
            provider: ProviderHandle::new("k8s"),
            depends_on: Vec::new(),
        }
    }

    #[test]
    fn valid_spec_passes() {
        assert!(sample_spec().validate().is_ok());
    }

    #[test]
    fn invalid_workload_name_fails() {
        let mut spec = sample_spec();
        spec.name = "My_App".to_string();
        assert!(spec.validate().is_err());
    }

    #[test]
    fn duplicate_job_names_fail() {
        let mut spec = sample_spec();
        for _ in 0..2 {
            spec.jobs.push(JobConfig {
                name: "migrate".to_string(),
                use_virtual_host: None,
                cron: None,
                args: None,
                restart_policy: None,
                ttl_seconds_after_finished: None,
            });
        }
        let err = spec.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate job name"));
    }

    #[test]
    fn deployment_false_deserializes_disabled() {
        let json = serde_json::json!({
            "name": "worker",
            "namespace": "prod",
            "pod": { "image": "worker:1" },
            "deployment": false,
            "provider": { "name": "k8s" },
        });
        let spec: WorkloadSpec = serde_json::from_value(json).unwrap();
        assert!(spec.deployment.is_disabled());
        assert!(!spec.service.is_disabled());
    }

    #[test]
    fn cron_job_round_trips() {
        let mut spec = sample_spec();
        spec.jobs.push(JobConfig {
            name: "report".to_string(),
            use_virtual_host: Some(true),
            cron: Some(CronConfig {
                schedule: "0 3 * * *".to_string(),
                failed_jobs_history_limit: None,
                successful_jobs_history_limit: Some(3),
                concurrency_policy: ConcurrencyPolicy::Forbid,
            }),
            args: None,
            restart_policy: None,
            ttl_seconds_after_finished: None,
        });
        let json = serde_json::to_value(&spec).unwrap();
        let back: WorkloadSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }
}
