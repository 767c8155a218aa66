//! Kubernetes manifest types for composed resources.
//!
//! Hand-rolled serde structs rather than generated client types: the apply
//! engine is external, so these only need to serialize to the exact wire
//! shape. Spec-level types (security contexts, tolerations, resource
//! requirements) are reused from `berth-common` where the shapes coincide.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use berth_common::spec::{
    ContainerSecurityContext, PodSecurityContext, ResourceRequirements, Toleration,
};
use berth_common::{HasApiResource, ObjectMeta};

/// Macro to implement default_api_version() and default_kind() for types
/// implementing HasApiResource.
macro_rules! impl_api_defaults {
    ($type:ty) => {
        impl $type {
            fn default_api_version() -> String {
                <Self as HasApiResource>::API_VERSION.to_string()
            }
            fn default_kind() -> String {
                <Self as HasApiResource>::KIND.to_string()
            }
        }
    };
}

// =============================================================================
// ConfigMap and Secret
// =============================================================================

/// Kubernetes ConfigMap for non-sensitive configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMap {
    /// API version
    #[serde(default = "ConfigMap::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "ConfigMap::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// String data
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

impl HasApiResource for ConfigMap {
    const API_VERSION: &'static str = "v1";
    const KIND: &'static str = "ConfigMap";
}

impl_api_defaults!(ConfigMap);

impl ConfigMap {
    /// Create a new ConfigMap
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ObjectMeta::new(name, namespace),
            data: BTreeMap::new(),
        }
    }
}

/// Kubernetes Secret for sensitive configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    /// API version
    #[serde(default = "Secret::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "Secret::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// String data (auto-encoded to base64 by K8s)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub string_data: BTreeMap<String, String>,
    /// Secret type
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

impl HasApiResource for Secret {
    const API_VERSION: &'static str = "v1";
    const KIND: &'static str = "Secret";
}

impl_api_defaults!(Secret);

impl Secret {
    /// Create a new Opaque Secret
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ObjectMeta::new(name, namespace),
            string_data: BTreeMap::new(),
            type_: Some("Opaque".to_string()),
        }
    }
}

// =============================================================================
// EnvFrom sources
// =============================================================================

/// Reference to a ConfigMap or Secret for loading env vars
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvFromSource {
    /// ConfigMap reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map_ref: Option<ConfigMapEnvSource>,
    /// Secret reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<SecretEnvSource>,
}

impl EnvFromSource {
    /// Reference a ConfigMap
    pub fn config_map(name: impl Into<String>) -> Self {
        Self {
            config_map_ref: Some(ConfigMapEnvSource { name: name.into() }),
            secret_ref: None,
        }
    }

    /// Reference a Secret
    pub fn secret(name: impl Into<String>) -> Self {
        Self {
            config_map_ref: None,
            secret_ref: Some(SecretEnvSource { name: name.into() }),
        }
    }
}

/// Reference to a ConfigMap for env vars
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConfigMapEnvSource {
    /// ConfigMap name
    pub name: String,
}

/// Reference to a Secret for env vars
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SecretEnvSource {
    /// Secret name
    pub name: String,
}

/// Reference to a local object by name (e.g., for imagePullSecrets)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalObjectReference {
    /// Object name
    pub name: String,
}

// =============================================================================
// Container
// =============================================================================

/// Container spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name
    pub name: String,
    /// Image
    pub image: String,
    /// Image pull policy (Always, IfNotPresent, Never)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,
    /// Command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,
    /// Args
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,
    /// Environment from ConfigMap/Secret references
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub env_from: Vec<EnvFromSource>,
    /// Ports
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ContainerPort>,
    /// Resource requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
    /// Liveness probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_probe: Option<Probe>,
    /// Lifecycle hooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<Lifecycle>,
    /// Volume mounts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volume_mounts: Vec<VolumeMount>,
    /// Security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<ContainerSecurityContext>,
}

/// Container port
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerPort {
    /// Port name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Port number
    pub container_port: u16,
    /// Protocol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

// =============================================================================
// Probes and lifecycle
// =============================================================================

/// Probe specification - maps 1:1 with the Kubernetes probe spec
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Probe {
    /// HTTP GET probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HttpGetAction>,
    /// Seconds after container start before probes begin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_delay_seconds: Option<i32>,
    /// Seconds between probe attempts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<i32>,
    /// Seconds before the probe times out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i32>,
    /// Consecutive failures before marking unhealthy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_threshold: Option<i32>,
}

/// HTTP GET action for a probe
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpGetAction {
    /// Path
    pub path: String,
    /// Port
    pub port: u16,
}

/// Container lifecycle hooks
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    /// Post-start hook
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_start: Option<LifecycleHandler>,
}

/// A lifecycle hook handler
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleHandler {
    /// Exec action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecAction>,
}

/// Exec action
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecAction {
    /// Command
    pub command: Vec<String>,
}

// =============================================================================
// Volumes
// =============================================================================

/// Pod volume — union of supported sources, exactly one populated
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    /// Volume name
    pub name: String,
    /// EmptyDir source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_dir: Option<EmptyDirVolumeSource>,
    /// Host path source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_path: Option<HostPathVolumeSource>,
    /// ConfigMap source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_map: Option<ConfigMapVolumeSource>,
    /// Secret source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<SecretVolumeSource>,
    /// CSI source (Azure file shares)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csi: Option<CsiVolumeSource>,
    /// PVC source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume_claim: Option<PvcVolumeSource>,
}

impl Volume {
    fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            empty_dir: None,
            host_path: None,
            config_map: None,
            secret: None,
            csi: None,
            persistent_volume_claim: None,
        }
    }

    /// Volume backed by an emptyDir
    pub fn from_empty_dir(name: impl Into<String>) -> Self {
        Self {
            empty_dir: Some(EmptyDirVolumeSource {}),
            ..Self::named(name)
        }
    }

    /// Volume backed by a host path
    pub fn from_host_path(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            host_path: Some(HostPathVolumeSource { path: path.into() }),
            ..Self::named(name)
        }
    }

    /// Volume backed by a ConfigMap
    pub fn from_config_map(name: impl Into<String>, cm_name: impl Into<String>) -> Self {
        Self {
            config_map: Some(ConfigMapVolumeSource {
                name: cm_name.into(),
            }),
            ..Self::named(name)
        }
    }

    /// Volume backed by a Secret
    pub fn from_secret(name: impl Into<String>, secret_name: impl Into<String>) -> Self {
        Self {
            secret: Some(SecretVolumeSource {
                secret_name: secret_name.into(),
            }),
            ..Self::named(name)
        }
    }

    /// Volume backed by an Azure file share via the file CSI driver.
    ///
    /// The share name is the volume name; credentials come from the secret.
    pub fn from_azure_file(name: impl Into<String>, secret_name: impl Into<String>) -> Self {
        let name = name.into();
        let mut attributes = BTreeMap::new();
        attributes.insert("secretName".to_string(), secret_name.into());
        attributes.insert("shareName".to_string(), name.clone());
        Self {
            csi: Some(CsiVolumeSource {
                driver: "file.csi.azure.com".to_string(),
                volume_attributes: attributes,
            }),
            ..Self::named(name)
        }
    }

    /// Volume backed by a PVC
    pub fn from_pvc(name: impl Into<String>, claim_name: impl Into<String>) -> Self {
        Self {
            persistent_volume_claim: Some(PvcVolumeSource {
                claim_name: claim_name.into(),
                read_only: None,
            }),
            ..Self::named(name)
        }
    }
}

/// EmptyDir volume source
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct EmptyDirVolumeSource {}

/// Host path volume source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HostPathVolumeSource {
    /// Path on the node
    pub path: String,
}

/// ConfigMap volume source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapVolumeSource {
    /// ConfigMap name
    pub name: String,
}

/// Secret volume source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretVolumeSource {
    /// Secret name
    pub secret_name: String,
}

/// CSI volume source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CsiVolumeSource {
    /// CSI driver name
    pub driver: String,
    /// Driver attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub volume_attributes: BTreeMap<String, String>,
}

/// PVC volume source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PvcVolumeSource {
    /// PVC claim name
    pub claim_name: String,
    /// Read only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

/// Volume mount
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeMount {
    /// Volume name
    pub name: String,
    /// Mount path
    pub mount_path: String,
    /// Sub path within the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
    /// Read only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

// =============================================================================
// Pod spec and template
// =============================================================================

/// Pod spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Containers
    pub containers: Vec<Container>,
    /// Volumes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<Volume>,
    /// Node selector
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    /// Tolerations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
    /// Pod-level security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_context: Option<PodSecurityContext>,
    /// Grace period before SIGKILL on termination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_grace_period_seconds: Option<i64>,
    /// Mount a service-account token into the pod
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automount_service_account_token: Option<bool>,
    /// Restart policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<String>,
    /// Image pull secrets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_pull_secrets: Vec<LocalObjectReference>,
}

/// Metadata for pod templates — labels only
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct TemplateMetadata {
    /// Labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

/// Pod template spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodTemplateSpec {
    /// Template metadata
    pub metadata: TemplateMetadata,
    /// Pod spec
    pub spec: PodSpec,
}

/// Label selector
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Match labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_labels: BTreeMap<String, String>,
}

// =============================================================================
// Deployment
// =============================================================================

/// Kubernetes Deployment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// API version
    #[serde(default = "Deployment::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "Deployment::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: DeploymentSpec,
}

impl HasApiResource for Deployment {
    const API_VERSION: &'static str = "apps/v1";
    const KIND: &'static str = "Deployment";
}

impl_api_defaults!(Deployment);

impl Deployment {
    /// Create a new Deployment
    pub fn new(metadata: ObjectMeta, spec: DeploymentSpec) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata,
            spec,
        }
    }
}

/// Deployment spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    /// Replica count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
    /// Old ReplicaSets to retain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,
    /// Pod selector
    pub selector: LabelSelector,
    /// Pod template
    pub template: PodTemplateSpec,
}

// =============================================================================
// Service
// =============================================================================

/// Kubernetes Service
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// API version
    #[serde(default = "Service::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "Service::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: ServiceSpec,
}

impl HasApiResource for Service {
    const API_VERSION: &'static str = "v1";
    const KIND: &'static str = "Service";
}

impl_api_defaults!(Service);

impl Service {
    /// Create a new Service
    pub fn new(metadata: ObjectMeta, spec: ServiceSpec) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata,
            spec,
        }
    }
}

/// Service spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Service type (ClusterIP when absent)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
    /// Pod selector
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub selector: BTreeMap<String, String>,
    /// Exposed ports
    pub ports: Vec<ServicePort>,
}

/// Service port
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    /// Port name
    pub name: String,
    /// External port
    pub port: u16,
    /// Target container port (defaults to `port`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<u16>,
    /// Protocol
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

// =============================================================================
// Job and CronJob
// =============================================================================

/// Kubernetes Job
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// API version
    #[serde(default = "Job::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "Job::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: JobSpec,
}

impl HasApiResource for Job {
    const API_VERSION: &'static str = "batch/v1";
    const KIND: &'static str = "Job";
}

impl_api_defaults!(Job);

impl Job {
    /// Create a new Job
    pub fn new(metadata: ObjectMeta, spec: JobSpec) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata,
            spec,
        }
    }
}

/// Job spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Seconds to retain the job after completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds_after_finished: Option<i64>,
    /// Pod template
    pub template: PodTemplateSpec,
}

/// Kubernetes CronJob
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CronJob {
    /// API version
    #[serde(default = "CronJob::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "CronJob::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: CronJobSpec,
}

impl HasApiResource for CronJob {
    const API_VERSION: &'static str = "batch/v1";
    const KIND: &'static str = "CronJob";
}

impl_api_defaults!(CronJob);

impl CronJob {
    /// Create a new CronJob
    pub fn new(metadata: ObjectMeta, spec: CronJobSpec) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata,
            spec,
        }
    }
}

/// CronJob spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CronJobSpec {
    /// Cron schedule expression
    pub schedule: String,
    /// Concurrency policy (Forbid, Allow, Replace)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency_policy: Option<String>,
    /// Failed runs to retain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_jobs_history_limit: Option<i32>,
    /// Successful runs to retain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_jobs_history_limit: Option<i32>,
    /// Job template executed on each trigger
    pub job_template: JobTemplateSpec,
}

/// Job template within a CronJob
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobTemplateSpec {
    /// Job spec
    pub spec: JobSpec,
}

// =============================================================================
// HorizontalPodAutoscaler
// =============================================================================

/// Kubernetes HorizontalPodAutoscaler (autoscaling/v2)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscaler {
    /// API version
    #[serde(default = "HorizontalPodAutoscaler::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "HorizontalPodAutoscaler::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: HorizontalPodAutoscalerSpec,
}

impl HasApiResource for HorizontalPodAutoscaler {
    const API_VERSION: &'static str = "autoscaling/v2";
    const KIND: &'static str = "HorizontalPodAutoscaler";
}

impl_api_defaults!(HorizontalPodAutoscaler);

impl HorizontalPodAutoscaler {
    /// Create a new HorizontalPodAutoscaler
    pub fn new(metadata: ObjectMeta, spec: HorizontalPodAutoscalerSpec) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata,
            spec,
        }
    }
}

/// HorizontalPodAutoscaler spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HorizontalPodAutoscalerSpec {
    /// The workload being scaled
    pub scale_target_ref: CrossVersionObjectReference,
    /// Minimum replicas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<u32>,
    /// Maximum replicas
    pub max_replicas: u32,
    /// Scaling metrics
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricSpec>,
}

/// Reference to the scaled workload
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrossVersionObjectReference {
    /// API version of the target
    pub api_version: String,
    /// Kind of the target
    pub kind: String,
    /// Name of the target
    pub name: String,
}

/// Autoscaling metric
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricSpec {
    /// Metric type (Resource)
    #[serde(rename = "type")]
    pub type_: String,
    /// Resource metric
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceMetricSource>,
}

impl MetricSpec {
    /// CPU utilization metric with an average-utilization target
    pub fn cpu_utilization(target_percent: u32) -> Self {
        Self {
            type_: "Resource".to_string(),
            resource: Some(ResourceMetricSource {
                name: "cpu".to_string(),
                target: MetricTarget {
                    type_: "Utilization".to_string(),
                    average_utilization: Some(target_percent),
                },
            }),
        }
    }
}

/// Resource metric source
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetricSource {
    /// Resource name (cpu, memory)
    pub name: String,
    /// Target value
    pub target: MetricTarget,
}

/// Metric target
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricTarget {
    /// Target type (Utilization)
    #[serde(rename = "type")]
    pub type_: String,
    /// Average utilization percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_utilization: Option<u32>,
}

// =============================================================================
// Ingress
// =============================================================================

/// Kubernetes Ingress (networking.k8s.io/v1)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ingress {
    /// API version
    #[serde(default = "Ingress::default_api_version")]
    pub api_version: String,
    /// Kind
    #[serde(default = "Ingress::default_kind")]
    pub kind: String,
    /// Metadata
    pub metadata: ObjectMeta,
    /// Spec
    pub spec: IngressSpec,
}

impl HasApiResource for Ingress {
    const API_VERSION: &'static str = "networking.k8s.io/v1";
    const KIND: &'static str = "Ingress";
}

impl_api_defaults!(Ingress);

impl Ingress {
    /// Create a new Ingress
    pub fn new(metadata: ObjectMeta, spec: IngressSpec) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata,
            spec,
        }
    }
}

/// Ingress spec
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressSpec {
    /// Ingress controller class
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,
    /// TLS sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tls: Vec<IngressTls>,
    /// Routing rules
    pub rules: Vec<IngressRule>,
}

/// Ingress TLS section
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressTls {
    /// Hosts covered by the certificate
    pub hosts: Vec<String>,
    /// Secret holding the certificate
    pub secret_name: String,
}

/// Ingress routing rule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressRule {
    /// Host the rule applies to
    pub host: String,
    /// HTTP paths
    pub http: HttpIngressRuleValue,
}

/// HTTP paths for an ingress rule
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressRuleValue {
    /// Paths
    pub paths: Vec<HttpIngressPath>,
}

/// A single ingress path
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HttpIngressPath {
    /// URL path
    pub path: String,
    /// Match type (Prefix or Exact)
    pub path_type: String,
    /// Backend service
    pub backend: IngressBackend,
}

/// Ingress backend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressBackend {
    /// Service backend
    pub service: IngressServiceBackend,
}

/// Service backend reference
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngressServiceBackend {
    /// Service name
    pub name: String,
    /// Service port
    pub port: ServiceBackendPort,
}

/// Service backend port
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceBackendPort {
    /// Port number
    pub number: u16,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_map_carries_api_version_and_kind() {
        let cm = ConfigMap::new("api-config", "prod");
        let json = serde_json::to_value(&cm).unwrap();
        assert_eq!(json["apiVersion"], "v1");
        assert_eq!(json["kind"], "ConfigMap");
        assert_eq!(json["metadata"]["name"], "api-config");
    }

    #[test]
    fn secret_defaults_to_opaque() {
        let secret = Secret::new("api-secret", "prod");
        assert_eq!(secret.type_.as_deref(), Some("Opaque"));
    }

    #[test]
    fn azure_file_volume_sets_driver_and_share() {
        let vol = Volume::from_azure_file("uploads", "storage-creds");
        let csi = vol.csi.expect("csi source should be set");
        assert_eq!(csi.driver, "file.csi.azure.com");
        assert_eq!(
            csi.volume_attributes.get("shareName"),
            Some(&"uploads".to_string())
        );
        assert_eq!(
            csi.volume_attributes.get("secretName"),
            Some(&"storage-creds".to_string())
        );
    }

    #[test]
    fn service_port_serializes_camel_case() {
        let port = ServicePort {
            name: "http".to_string(),
            port: 80,
            target_port: Some(8080),
            protocol: Some("TCP".to_string()),
        };
        let json = serde_json::to_value(&port).unwrap();
        assert_eq!(json["targetPort"], 8080);
    }

    #[test]
    fn hpa_cpu_metric_targets_utilization() {
        let metric = MetricSpec::cpu_utilization(80);
        let json = serde_json::to_value(&metric).unwrap();
        assert_eq!(json["type"], "Resource");
        assert_eq!(json["resource"]["target"]["averageUtilization"], 80);
    }

    #[test]
    fn ingress_spec_omits_empty_tls() {
        let ingress = Ingress::new(
            ObjectMeta::new("api-ingress", "prod"),
            IngressSpec {
                ingress_class_name: Some("nginx".to_string()),
                tls: Vec::new(),
                rules: Vec::new(),
            },
        );
        let json = serde_json::to_value(&ingress).unwrap();
        assert!(json["spec"].get("tls").is_none());
    }
}
