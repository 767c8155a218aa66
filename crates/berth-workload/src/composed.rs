//! Composition output handles.

use berth_common::{ResourceRef, ResourceRequest};

use crate::k8s::{
    ConfigMap, CronJob, Deployment, HorizontalPodAutoscaler, Ingress, Job, Secret, Service,
};

/// A composed batch workload: one-shot or cron-scheduled.
#[derive(Clone, Debug, PartialEq)]
pub enum ComposedJob {
    /// One-shot job with post-completion retention
    OneShot(ResourceRequest<Job>),
    /// Cron-scheduled job
    Scheduled(ResourceRequest<CronJob>),
}

impl ComposedJob {
    /// The job resource name.
    pub fn name(&self) -> &str {
        match self {
            Self::OneShot(request) => &request.resource.metadata.name,
            Self::Scheduled(request) => &request.resource.metadata.name,
        }
    }

    /// Reference to the job resource.
    pub fn resource_ref(&self) -> ResourceRef {
        match self {
            Self::OneShot(_) => ResourceRef::new("Job", self.name()),
            Self::Scheduled(_) => ResourceRef::new("CronJob", self.name()),
        }
    }

    /// Engine options attached to the job.
    pub fn options(&self) -> &berth_common::ResourceOptions {
        match self {
            Self::OneShot(request) => &request.options,
            Self::Scheduled(request) => &request.options,
        }
    }
}

/// Everything one composition pass derived from a `WorkloadSpec`.
///
/// Absent members were skipped by the composer's decision points — a
/// suppressed deployment, no service config, no ingress config, no
/// autoscale policy. Higher-level callers use the handles to attach further
/// resources (extra ingress rules, additional secrets) after the fact.
#[derive(Debug, Default)]
pub struct ComposedWorkload {
    /// Config source, when config values were supplied
    pub config: Option<ResourceRequest<ConfigMap>>,
    /// Secret source, when secret values were supplied
    pub secret: Option<ResourceRequest<Secret>>,
    /// Primary workload, unless suppressed
    pub workload: Option<ResourceRequest<Deployment>>,
    /// Batch workloads
    pub jobs: Vec<ComposedJob>,
    /// Service, when a workload exists and creation was not suppressed
    pub service: Option<ResourceRequest<Service>>,
    /// Ingress binding, when a service exists and config was supplied
    pub ingress: Option<ResourceRequest<Ingress>>,
    /// Autoscaler, when a workload exists and a policy was supplied
    pub autoscaler: Option<ResourceRequest<HorizontalPodAutoscaler>>,
}

impl ComposedWorkload {
    /// Reference to the primary workload, when one was composed.
    pub fn workload_ref(&self) -> Option<ResourceRef> {
        self.workload
            .as_ref()
            .map(|request| ResourceRef::new("Deployment", &request.resource.metadata.name))
    }

    /// Flat view of the composition graph: every resource paired with its
    /// dependency edges, in a stable order. Useful for handing the whole
    /// set to the engine and for idempotence checks.
    pub fn graph(&self) -> Vec<(ResourceRef, Vec<ResourceRef>)> {
        let mut graph = Vec::new();
        if let Some(ref config) = self.config {
            graph.push((
                ResourceRef::new("ConfigMap", &config.resource.metadata.name),
                config.options.depends_on.clone(),
            ));
        }
        if let Some(ref secret) = self.secret {
            graph.push((
                ResourceRef::new("Secret", &secret.resource.metadata.name),
                secret.options.depends_on.clone(),
            ));
        }
        if let Some(ref workload) = self.workload {
            graph.push((
                ResourceRef::new("Deployment", &workload.resource.metadata.name),
                workload.options.depends_on.clone(),
            ));
        }
        for job in &self.jobs {
            graph.push((job.resource_ref(), job.options().depends_on.clone()));
        }
        if let Some(ref service) = self.service {
            graph.push((
                ResourceRef::new("Service", &service.resource.metadata.name),
                service.options.depends_on.clone(),
            ));
        }
        if let Some(ref ingress) = self.ingress {
            graph.push((
                ResourceRef::new("Ingress", &ingress.resource.metadata.name),
                ingress.options.depends_on.clone(),
            ));
        }
        if let Some(ref autoscaler) = self.autoscaler {
            graph.push((
                ResourceRef::new(
                    "HorizontalPodAutoscaler",
                    &autoscaler.resource.metadata.name,
                ),
                autoscaler.options.depends_on.clone(),
            ));
        }
        graph
    }
}
