//! Pod template assembly.
//!
//! Builds an immutable [`PodTemplate`] from a pod configuration plus the
//! env-from handles, then converts it into deployment/job/cron-job specs.
//! The input configuration is never mutated; virtual-host overrides and
//! defaulting produce new values, so one configuration can safely feed the
//! primary workload and any number of jobs.

use std::collections::BTreeMap;

use berth_common::spec::job::{CronConfig, DEFAULT_JOB_HISTORY_LIMIT};
use berth_common::spec::{
    LivenessProbeConfig, PodConfig, ResourcePolicy, ResourceQuantity, ResourceRequirements,
    RestartPolicy, Toleration, VolumeBinding, VolumeSource,
};
use berth_common::LABEL_APP;

use crate::k8s::{
    Container, ContainerPort, CronJobSpec, DeploymentSpec, EnvFromSource, ExecAction,
    HttpGetAction, JobSpec, JobTemplateSpec, LabelSelector, Lifecycle, LifecycleHandler,
    LocalObjectReference, PodSpec, PodTemplateSpec, Probe, TemplateMetadata, Volume, VolumeMount,
};

/// Grace period before SIGKILL on pod termination.
const TERMINATION_GRACE_PERIOD_SECONDS: i64 = 30;

/// Default resource requirements applied when no policy was given.
pub fn default_resources() -> ResourceRequirements {
    ResourceRequirements {
        limits: Some(ResourceQuantity::cpu_memory("500m", "0.5Gi")),
        requests: Some(ResourceQuantity::cpu_memory("1m", "10Mi")),
    }
}

/// Node selector routing pods to virtual-host (burst-capacity) nodes.
pub fn virtual_host_node_selector() -> BTreeMap<String, String> {
    let mut selector = BTreeMap::new();
    selector.insert("kubernetes.io/role".to_string(), "agent".to_string());
    selector.insert("beta.kubernetes.io/os".to_string(), "linux".to_string());
    selector.insert("type".to_string(), "virtual-kubelet".to_string());
    selector
}

/// Toleration paired with [`virtual_host_node_selector`].
pub fn virtual_host_tolerations() -> Vec<Toleration> {
    vec![Toleration {
        effect: Some("NoSchedule".to_string()),
        key: Some("virtual-kubelet.io/provider".to_string()),
        value: Some("azure".to_string()),
        operator: None,
    }]
}

/// An assembled pod template, ready to wrap in a workload resource.
#[derive(Clone, Debug, PartialEq)]
pub struct PodTemplate {
    labels: BTreeMap<String, String>,
    spec: PodSpec,
}

impl PodTemplate {
    /// The pod spec (for inspection in tests and higher-level callers).
    pub fn pod_spec(&self) -> &PodSpec {
        &self.spec
    }

    fn template_spec(&self) -> PodTemplateSpec {
        PodTemplateSpec {
            metadata: TemplateMetadata {
                labels: self.labels.clone(),
            },
            spec: self.spec.clone(),
        }
    }

    /// Wrap the template in a deployment spec.
    pub fn as_deployment_spec(&self, replicas: u32, revision_history_limit: i32) -> DeploymentSpec {
        DeploymentSpec {
            replicas: Some(replicas),
            revision_history_limit: Some(revision_history_limit),
            selector: LabelSelector {
                match_labels: self.labels.clone(),
            },
            template: self.template_spec(),
        }
    }

    /// Wrap the template in a one-shot job spec.
    pub fn as_job_spec(&self, ttl_seconds_after_finished: i64) -> JobSpec {
        JobSpec {
            ttl_seconds_after_finished: Some(ttl_seconds_after_finished),
            template: self.template_spec(),
        }
    }

    /// Wrap the template in a cron-job spec, defaulting retained history to
    /// one successful and one failed run.
    pub fn as_cron_job_spec(&self, cron: &CronConfig) -> CronJobSpec {
        CronJobSpec {
            schedule: cron.schedule.clone(),
            concurrency_policy: Some(cron.concurrency_policy.to_string()),
            failed_jobs_history_limit: Some(
                cron.failed_jobs_history_limit
                    .unwrap_or(DEFAULT_JOB_HISTORY_LIMIT),
            ),
            successful_jobs_history_limit: Some(
                cron.successful_jobs_history_limit
                    .unwrap_or(DEFAULT_JOB_HISTORY_LIMIT),
            ),
            job_template: JobTemplateSpec {
                spec: JobSpec {
                    ttl_seconds_after_finished: None,
                    template: self.template_spec(),
                },
            },
        }
    }
}

/// Builds a [`PodTemplate`] from a pod configuration.
pub struct PodTemplateBuilder<'a> {
    name: &'a str,
    pod: &'a PodConfig,
    env_from: &'a [EnvFromSource],
    args: Option<&'a [String]>,
    restart_policy: Option<RestartPolicy>,
    virtual_host: bool,
}

impl<'a> PodTemplateBuilder<'a> {
    /// Create a builder for a named workload's pod configuration.
    pub fn new(name: &'a str, pod: &'a PodConfig, env_from: &'a [EnvFromSource]) -> Self {
        Self {
            name,
            pod,
            env_from,
            args: None,
            restart_policy: None,
            virtual_host: false,
        }
    }

    /// Override container args.
    pub fn with_args(mut self, args: Option<&'a [String]>) -> Self {
        self.args = args;
        self
    }

    /// Set the pod restart policy.
    pub fn with_restart_policy(mut self, policy: Option<RestartPolicy>) -> Self {
        self.restart_policy = policy;
        self
    }

    /// Route the pod onto virtual-host nodes.
    ///
    /// Overwrites node selector and tolerations with the fixed virtual-host
    /// pair; when no explicit resource policy was given, resources become
    /// unlimited (virtual-host nodes do not accept reservations).
    pub fn on_virtual_host(mut self, virtual_host: bool) -> Self {
        self.virtual_host = virtual_host;
        self
    }

    /// Assemble the template.
    pub fn build(self) -> PodTemplate {
        let pod = self.pod;

        let (node_selector, tolerations) = if self.virtual_host {
            (
                Some(virtual_host_node_selector()),
                virtual_host_tolerations(),
            )
        } else {
            (pod.node_selector.clone(), pod.tolerations.clone())
        };

        let effective_policy = if self.virtual_host && pod.resources.is_none() {
            Some(ResourcePolicy::Unlimited)
        } else {
            pod.resources.clone()
        };
        let resources = resolve_resources(effective_policy.as_ref());

        let mut volumes = Vec::with_capacity(pod.volumes.len());
        let mut volume_mounts = Vec::with_capacity(pod.volumes.len());
        for binding in &pod.volumes {
            let (volume, mount) = translate_volume(binding);
            volumes.push(volume);
            volume_mounts.push(mount);
        }

        let ports = pod
            .effective_ports()
            .iter()
            .map(|(name, port)| ContainerPort {
                name: Some(name.clone()),
                container_port: *port,
                protocol: None,
            })
            .collect();

        let probes = pod.probes.as_ref();
        let liveness_probe = probes.and_then(|p| p.liveness.as_ref()).map(liveness_probe);
        let lifecycle = probes
            .and_then(|p| p.post_start.as_ref())
            .map(|commands| Lifecycle {
                post_start: Some(LifecycleHandler {
                    exec: Some(ExecAction {
                        command: commands.clone(),
                    }),
                }),
            });

        let container = Container {
            name: self.name.to_string(),
            image: pod.image.clone(),
            image_pull_policy: pod.image_pull_policy.as_ref().map(ToString::to_string),
            command: pod.command.clone(),
            args: self.args.map(<[String]>::to_vec),
            env_from: self.env_from.to_vec(),
            ports,
            resources,
            liveness_probe,
            lifecycle,
            volume_mounts,
            security_context: pod.container_security_context.clone(),
        };

        let mut labels = BTreeMap::new();
        labels.insert(LABEL_APP.to_string(), self.name.to_string());

        PodTemplate {
            labels,
            spec: PodSpec {
                containers: vec![container],
                volumes,
                node_selector,
                tolerations,
                security_context: pod.pod_security_context.clone(),
                termination_grace_period_seconds: Some(TERMINATION_GRACE_PERIOD_SECONDS),
                automount_service_account_token: Some(false),
                restart_policy: self.restart_policy.map(|p| p.to_string()),
                image_pull_secrets: pod
                    .image_pull_secret
                    .iter()
                    .map(|name| LocalObjectReference { name: name.clone() })
                    .collect(),
            },
        }
    }
}

/// Resolve the effective resource section.
///
/// Precedence: explicit unlimited sentinel → none; explicit requirements →
/// passed through; absent → global defaults.
fn resolve_resources(policy: Option<&ResourcePolicy>) -> Option<ResourceRequirements> {
    match policy {
        None => Some(default_resources()),
        Some(ResourcePolicy::Unlimited) => None,
        Some(ResourcePolicy::Requirements(requirements)) => Some(requirements.clone()),
    }
}

/// Translate a volume binding into a pod volume and its mount.
///
/// The binding name is lower-cased on both sides so volume and mount always
/// agree.
fn translate_volume(binding: &VolumeBinding) -> (Volume, VolumeMount) {
    let name = binding.name.to_lowercase();
    let volume = match &binding.source {
        VolumeSource::Scratch => Volume::from_empty_dir(&name),
        VolumeSource::HostPath { path } => Volume::from_host_path(&name, path),
        VolumeSource::Config { config_map_name } => Volume::from_config_map(&name, config_map_name),
        VolumeSource::Secret { secret_name } => Volume::from_secret(&name, secret_name),
        VolumeSource::AzureFile { secret_name } => Volume::from_azure_file(&name, secret_name),
        VolumeSource::Claim { claim_name } => Volume::from_pvc(&name, claim_name),
    };
    let mount = VolumeMount {
        name,
        mount_path: binding.mount_path.clone(),
        sub_path: binding.sub_path.clone(),
        read_only: Some(binding.read_only.unwrap_or(false)),
    };
    (volume, mount)
}

/// Translate a liveness probe configuration, applying the fixed defaults.
fn liveness_probe(config: &LivenessProbeConfig) -> Probe {
    Probe {
        http_get: Some(HttpGetAction {
            path: config.http_get.clone(),
            port: config.port,
        }),
        initial_delay_seconds: Some(config.initial_delay_seconds.unwrap_or(30)),
        period_seconds: Some(config.period_seconds.unwrap_or(300)),
        timeout_seconds: Some(config.timeout_seconds.unwrap_or(5)),
        failure_threshold: Some(config.failure_threshold.unwrap_or(2)),
    }
}

// =============================================================================
// Tests
// =============================================================================
