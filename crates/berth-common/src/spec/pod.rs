//! Pod configuration — the container/volume/probe/scheduling core every
//! composed workload (deployment, job, cron job) is built from.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Named port → container port.
pub type PortMap = BTreeMap<String, u16>;

/// Default container port exposed when the port map is empty.
pub const DEFAULT_PORT_NAME: &str = "http";

/// Default container port value paired with [`DEFAULT_PORT_NAME`].
pub const DEFAULT_PORT: u16 = 8080;

/// Pod configuration for a workload.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodConfig {
    /// Named network ports (defaults to `http: 8080` when empty)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub ports: PortMap,

    /// Container image reference
    pub image: String,

    /// Image pull secret name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secret: Option<String>,

    /// Image pull policy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<ImagePullPolicy>,

    /// Resource policy: absent → global defaults, `Unlimited` → no
    /// requests/limits, explicit requirements → passed through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourcePolicy>,

    /// Container command
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    /// Volume bindings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<VolumeBinding>,

    /// Pod-level security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_security_context: Option<PodSecurityContext>,

    /// Container-level security context
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_security_context: Option<ContainerSecurityContext>,

    /// Tolerations (overwritten by virtual-host scheduling)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,

    /// Node selector (overwritten by virtual-host scheduling)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    /// Liveness probe and lifecycle hooks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probes: Option<ProbesConfig>,
}

impl PodConfig {
    /// The declared ports, defaulted to a single `http: 8080` entry when the
    /// map is empty.
    pub fn effective_ports(&self) -> PortMap {
        if self.ports.is_empty() {
            let mut ports = PortMap::new();
            ports.insert(DEFAULT_PORT_NAME.to_string(), DEFAULT_PORT);
            ports
        } else {
            self.ports.clone()
        }
    }

    /// Validate the pod configuration
    pub fn validate(&self) -> Result<(), Error> {
        if self.image.trim().is_empty() {
            return Err(Error::validation_for_field(
                "pod.image",
                "image cannot be empty",
            ));
        }

        let mut seen_ports = std::collections::HashSet::new();
        for (name, port) in &self.ports {
            if *port == 0 {
                return Err(Error::validation_for_field(
                    "pod.ports",
                    format!("port '{name}': port cannot be 0"),
                ));
            }
            if !seen_ports.insert(*port) {
                return Err(Error::validation_for_field(
                    "pod.ports",
                    format!("duplicate port number: {port}"),
                ));
            }
        }

        let mut seen_volumes = std::collections::HashSet::new();
        for volume in &self.volumes {
            volume.validate()?;
            if !seen_volumes.insert(volume.name.to_lowercase()) {
                return Err(Error::validation_for_field(
                    "pod.volumes",
                    format!("duplicate volume name: {}", volume.name),
                ));
            }
        }

        Ok(())
    }
}

/// Image pull policy
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ImagePullPolicy {
    /// Pull on every pod start
    Always,
    /// Pull only when the image is absent on the node
    IfNotPresent,
    /// Never pull
    Never,
}

impl std::fmt::Display for ImagePullPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Always => write!(f, "Always"),
            Self::IfNotPresent => write!(f, "IfNotPresent"),
            Self::Never => write!(f, "Never"),
        }
    }
}

/// Pod restart policy
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Never restart on failure
    #[default]
    Never,
    /// Restart on failure
    OnFailure,
    /// Always restart
    Always,
}

impl std::fmt::Display for RestartPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Never => write!(f, "Never"),
            Self::OnFailure => write!(f, "OnFailure"),
            Self::Always => write!(f, "Always"),
        }
    }
}

// =============================================================================
// Resources
// =============================================================================

/// Resource policy for the container.
///
/// The variant is decided where the spec is constructed: `Unlimited` is the
/// explicit "no requests or limits" sentinel (virtual-host nodes reject
/// reservations), `Requirements` passes an explicit object through.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ResourcePolicy {
    /// No requests or limits
    Unlimited,
    /// Explicit requests/limits
    Requirements(ResourceRequirements),
}

/// Resource requirements
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRequirements {
    /// Requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<ResourceQuantity>,
    /// Limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<ResourceQuantity>,
}

/// Resource quantity
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
pub struct ResourceQuantity {
    /// CPU quantity (e.g., "500m")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,
    /// Memory quantity (e.g., "0.5Gi")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

impl ResourceQuantity {
    /// Quantity with both CPU and memory set
    pub fn cpu_memory(cpu: impl Into<String>, memory: impl Into<String>) -> Self {
        Self {
            cpu: Some(cpu.into()),
            memory: Some(memory.into()),
        }
    }
}

// =============================================================================
// Volumes
// =============================================================================

/// A volume binding: one mount, one source.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VolumeBinding {
    /// Volume name (lower-cased when translated)
    pub name: String,
    /// Mount path inside the container
    pub mount_path: String,
    /// Sub path within the volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_path: Option<String>,
    /// Mount read-only (defaults to false)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// Backing source
    pub source: VolumeSource,
}

impl VolumeBinding {
    /// Validate the binding
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::validation_for_field(
                "pod.volumes",
                "volume name cannot be empty",
            ));
        }
        if self.mount_path.trim().is_empty() {
            return Err(Error::validation_for_field(
                "pod.volumes",
                format!("volume '{}': mount path cannot be empty", self.name),
            ));
        }
        Ok(())
    }
}

/// Backing source for a volume binding.
///
/// Exactly one source per binding, decided at the boundary where the spec is
/// constructed — no field-presence inspection downstream.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum VolumeSource {
    /// Ephemeral scratch directory
    Scratch,
    /// Host path mount
    HostPath {
        /// Path on the node
        path: String,
    },
    /// Backed by a ConfigMap
    Config {
        /// ConfigMap name
        config_map_name: String,
    },
    /// Backed by a Secret
    Secret {
        /// Secret name
        secret_name: String,
    },
    /// Azure file share, credentials from a Secret
    AzureFile {
        /// Secret holding the storage-account credentials
        secret_name: String,
    },
    /// Backed by a persistent volume claim
    Claim {
        /// Claim name
        claim_name: String,
    },
}

// =============================================================================
// Probes and lifecycle
// =============================================================================

/// Probe and lifecycle configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProbesConfig {
    /// HTTP liveness probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness: Option<LivenessProbeConfig>,
    /// Post-start exec hook commands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_start: Option<Vec<String>>,
}

/// HTTP liveness probe configuration.
///
/// Unset timings fall back to: initial delay 30s, period 300s, timeout 5s,
/// failure threshold 2.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LivenessProbeConfig {
    /// HTTP GET path
    pub http_get: String,
    /// Probe port
    pub port: u16,
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

// =============================================================================
// Security and scheduling
// =============================================================================

/// Container-level security context
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerSecurityContext {
    /// Run container in privileged mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privileged: Option<bool>,
    /// Mount root filesystem as read-only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only_root_filesystem: Option<bool>,
    /// Require the container to run as a non-root user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_non_root: Option<bool>,
    /// UID to run the container as
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_user: Option<i64>,
    /// GID to run the container as
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_group: Option<i64>,
    /// Allow privilege escalation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_privilege_escalation: Option<bool>,
}

/// Pod-level security context
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PodSecurityContext {
    /// Require all containers to run as non-root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_non_root: Option<bool>,
    /// UID applied to all containers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_as_user: Option<i64>,
    /// GID applied to all volumes so files are group-readable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fs_group: Option<i64>,
}

/// Kubernetes toleration
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    /// Taint key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Match operator (Equal or Exists)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    /// Taint value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Taint effect (e.g., NoSchedule)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_pod() -> PodConfig {
        PodConfig {
            image: "nginx:latest".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_port_map_defaults_to_http_8080() {
        let pod = minimal_pod();
        let ports = pod.effective_ports();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports.get("http"), Some(&8080));
    }

    #[test]
    fn declared_ports_are_not_defaulted() {
        let mut pod = minimal_pod();
        pod.ports.insert("grpc".to_string(), 9090);
        let ports = pod.effective_ports();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports.get("grpc"), Some(&9090));
    }

    #[test]
    fn empty_image_fails_validation() {
        let pod = PodConfig::default();
        let err = pod.validate().unwrap_err();
        assert_eq!(err.field(), Some("pod.image"));
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut pod = minimal_pod();
        pod.ports.insert("http".to_string(), 0);
        assert!(pod.validate().is_err());
    }

    #[test]
    fn duplicate_port_numbers_fail_validation() {
        let mut pod = minimal_pod();
        pod.ports.insert("http".to_string(), 8080);
        pod.ports.insert("admin".to_string(), 8080);
        assert!(pod.validate().is_err());
    }

    #[test]
    fn duplicate_volume_names_fail_validation() {
        let mut pod = minimal_pod();
        for name in ["data", "Data"] {
            pod.volumes.push(VolumeBinding {
                name: name.to_string(),
                mount_path: "/data".to_string(),
                sub_path: None,
                read_only: None,
                source: VolumeSource::Scratch,
            });
        }
        assert!(pod.validate().is_err());
    }

    #[test]
    fn volume_without_mount_path_fails_validation() {
        let binding = VolumeBinding {
            name: "data".to_string(),
            mount_path: " ".to_string(),
            sub_path: None,
            read_only: None,
            source: VolumeSource::Scratch,
        };
        assert!(binding.validate().is_err());
    }

    #[test]
    fn volume_source_serializes_tagged() {
        let scratch = serde_json::to_value(VolumeSource::Scratch).unwrap();
        assert_eq!(scratch, serde_json::json!("scratch"));

        let claim = serde_json::to_value(VolumeSource::Claim {
            claim_name: "data".to_string(),
        })
        .unwrap();
        assert_eq!(claim, serde_json::json!({ "claim": { "claimName": "data" } }));
    }

    #[test]
    fn restart_policy_displays_k8s_values() {
        assert_eq!(RestartPolicy::Never.to_string(), "Never");
        assert_eq!(RestartPolicy::OnFailure.to_string(), "OnFailure");
        assert_eq!(RestartPolicy::Always.to_string(), "Always");
    }
}
