//! WorkloadComposer — single-pass conditional composition.
//!
//! Turns one `WorkloadSpec` evaluation into the coordinated resource set:
//! config/secret sources feed the pod template, the pod template feeds the
//! primary workload and the batch jobs, and service → ingress → autoscaler
//! each require what the earlier steps produced. The decision order is
//! fixed; nothing here races, and the only await point is the secret store.

use chrono::Utc;
use tracing::{debug, info};

use berth_common::error::Error;
use berth_common::secrets::SecretStore;
use berth_common::spec::{VolumeBinding, VolumeSource, WorkloadSpec};
use berth_common::{
    CustomTimeouts, ObjectMeta, ResourceOptions, ResourceRef, ResourceRequest, LABEL_TIME,
};

use crate::composed::ComposedWorkload;
use crate::k8s::Deployment;
use crate::pipeline::pod_template::PodTemplateBuilder;
use crate::pipeline::{autoscale, config_secret, ingress, jobs, service};

/// Old ReplicaSets retained on the primary workload.
const REVISION_HISTORY_LIMIT: i32 = 1;

/// Composes a `WorkloadSpec` into Kubernetes resource requests.
///
/// ```rust,ignore
/// let composed = WorkloadComposer::new(&spec).compose(&store).await?;
/// ```
pub struct WorkloadComposer<'a> {
    spec: &'a WorkloadSpec,
}

impl<'a> WorkloadComposer<'a> {
    /// Create a composer for a spec.
    pub fn new(spec: &'a WorkloadSpec) -> Self {
        Self { spec }
    }

    /// Run the composition pass.
    ///
    /// Decision points, in order: config/secret resolution (always), primary
    /// workload (unless suppressed), batch jobs, service (requires the
    /// workload), ingress (requires the service), autoscaler (requires the
    /// workload).
    pub async fn compose(self, store: &dyn SecretStore) -> Result<ComposedWorkload, Error> {
        let spec = self.spec;
        spec.validate()?;
        debug!(workload = %spec.name, namespace = %spec.namespace, "composing workload");

        // 1. Config/secret sources.
        let sources = config_secret::resolve(
            &spec.name,
            &spec.namespace,
            spec.config_map.as_ref(),
            spec.secrets.as_ref(),
            &spec.provider,
            &spec.depends_on,
            store,
        )
        .await?;
        let source_refs = sources.refs();

        // Effective pod configuration: the spec's pod plus the config/secret
        // volume mappings. The input spec itself is never touched.
        let mut pod = spec.pod.clone();
        if let (Some(mapping), Some(config)) = (&spec.map_config_to_volume, &sources.config) {
            pod.volumes.push(VolumeBinding {
                name: mapping.name.clone(),
                mount_path: mapping.path.clone(),
                sub_path: mapping.sub_path.clone(),
                read_only: None,
                source: VolumeSource::Config {
                    config_map_name: config.resource.metadata.name.clone(),
                },
            });
        }
        if let (Some(mapping), Some(secret)) = (&spec.map_secrets_to_volume, &sources.secret) {
            pod.volumes.push(VolumeBinding {
                name: mapping.name.clone(),
                mount_path: mapping.path.clone(),
                sub_path: mapping.sub_path.clone(),
                read_only: None,
                source: VolumeSource::Secret {
                    secret_name: secret.resource.metadata.name.clone(),
                },
            });
        }

        // 2. Primary workload, unless suppressed.
        let deployment_config = spec.deployment.options();
        let workload = deployment_config.as_ref().map(|config| {
            let stamp = if config.enforce_redeployment {
                Utc::now().timestamp_millis().to_string()
            } else {
                String::new()
            };

            let template = PodTemplateBuilder::new(&spec.name, &pod, &sources.env_from)
                .with_args(config.args.as_deref())
                .on_virtual_host(config.use_virtual_host)
                .build();

            let metadata = ObjectMeta::new(&spec.name, &spec.namespace)
                .with_label(LABEL_TIME, stamp)
                .skip_await();

            let mut options = ResourceOptions::new(spec.provider.clone())
                .with_depends_on(spec.depends_on.iter().cloned())
                .with_depends_on(source_refs.iter().cloned())
                .delete_before_replace();
            options.custom_timeouts = Some(CustomTimeouts::one_minute_apply());
            if config.enforce_redeployment {
                options.replace_on_changes = vec!["*".to_string()];
            }

            let deployment = Deployment::new(
                metadata,
                template.as_deployment_spec(config.replicas.unwrap_or(1), REVISION_HISTORY_LIMIT),
            );
            ResourceRequest::new(deployment, options)
        });
        if workload.is_none() {
            debug!(workload = %spec.name, "primary workload suppressed");
        }

        // 3. Batch jobs, inheriting the workload's scheduling class.
        let inherit_virtual_host = deployment_config
            .as_ref()
            .map(|config| config.use_virtual_host)
            .unwrap_or(false);
        let mut job_depends_on = spec.depends_on.clone();
        job_depends_on.extend(source_refs.iter().cloned());
        let composed_jobs: Vec<_> = spec
            .jobs
            .iter()
            .map(|job| {
                jobs::build(
                    &spec.name,
                    &spec.namespace,
                    &pod,
                    &sources.env_from,
                    job,
                    inherit_virtual_host,
                    &spec.provider,
                    &job_depends_on,
                )
            })
            .collect();

        // 4. Service — requires the workload, skipped when suppressed.
        let workload_ref = workload
            .as_ref()
            .map(|request| ResourceRef::new("Deployment", &request.resource.metadata.name));
        let composed_service = match (&workload_ref, spec.service.options()) {
            (Some(workload_ref), Some(service_config)) => Some(service::derive(
                &spec.name,
                &spec.namespace,
                &pod.effective_ports(),
                &service_config,
                &spec.provider,
                workload_ref,
            )),
            _ => None,
        };

        // 5. Ingress — requires the service and an ingress configuration.
        let composed_ingress = match (&composed_service, &spec.ingress) {
            (Some(service_request), Some(ingress_config)) => {
                // effective_ports() guarantees at least one service port.
                let backend_port = service_request
                    .resource
                    .spec
                    .ports
                    .first()
                    .map(|port| port.port)
                    .unwrap_or(80);
                Some(ingress::build(
                    &spec.name,
                    &spec.namespace,
                    &service_request.resource.metadata.name,
                    backend_port,
                    ingress_config,
                    &spec.provider,
                )?)
            }
            _ => None,
        };

        // 6. Autoscaler — requires the workload and a policy.
        let autoscaler = match (&workload_ref, &spec.autoscale) {
            (Some(workload_ref), Some(policy)) => Some(autoscale::attach(
                &spec.name,
                &spec.namespace,
                policy,
                &spec.provider,
                workload_ref,
            )),
            _ => None,
        };

        let composed = ComposedWorkload {
            config: sources.config,
            secret: sources.secret,
            workload,
            jobs: composed_jobs,
            service: composed_service,
            ingress: composed_ingress,
            autoscaler,
        };
        info!(
            workload = %spec.name,
            resources = composed.graph().len(),
            "workload composed"
        );
        Ok(composed)
    }
}
