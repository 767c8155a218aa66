//! Batch workload derivation — one-shot jobs and cron-scheduled jobs.
//!
//! Each job shares the workload's pod configuration and env-from handles,
//! inheriting the primary workload's scheduling class unless it overrides
//! it. A cron schedule turns the job into a CronJob; otherwise a one-shot
//! Job with post-completion retention is emitted.

use berth_common::spec::job::{JobConfig, DEFAULT_JOB_TTL_SECONDS};
use berth_common::spec::PodConfig;
use berth_common::{ObjectMeta, ProviderHandle, ResourceOptions, ResourceRef, ResourceRequest};

use crate::composed::ComposedJob;
use crate::k8s::{CronJob, EnvFromSource, Job};
use crate::pipeline::pod_template::PodTemplateBuilder;

/// Build the batch resource for one job configuration.
///
/// `inherit_virtual_host` is the primary workload's scheduling class; it
/// applies when the job does not set its own.
#[allow(clippy::too_many_arguments)]
pub fn build(
    workload_name: &str,
    namespace: &str,
    pod: &PodConfig,
    env_from: &[EnvFromSource],
    job: &JobConfig,
    inherit_virtual_host: bool,
    provider: &ProviderHandle,
    depends_on: &[ResourceRef],
) -> ComposedJob {
    let virtual_host = job.use_virtual_host.unwrap_or(inherit_virtual_host);
    let restart_policy = job.restart_policy.clone().unwrap_or_default();

    let template = PodTemplateBuilder::new(workload_name, pod, env_from)
        .with_args(job.args.as_deref())
        .with_restart_policy(Some(restart_policy))
        .on_virtual_host(virtual_host)
        .build();

    let options = ResourceOptions::new(provider.clone())
        .with_depends_on(depends_on.iter().cloned())
        .delete_before_replace();

    if let Some(ref cron) = job.cron {
        let cron_job = CronJob::new(
            ObjectMeta::new(&job.name, namespace),
            template.as_cron_job_spec(cron),
        );
        ComposedJob::Scheduled(ResourceRequest::new(cron_job, options))
    } else {
        let ttl = job
            .ttl_seconds_after_finished
            .unwrap_or(DEFAULT_JOB_TTL_SECONDS);
        let one_shot = Job::new(
            ObjectMeta::new(&job.name, namespace).skip_await(),
            template.as_job_spec(ttl),
        );
        ComposedJob::OneShot(ResourceRequest::new(one_shot, options))
    }
}

// =============================================================================
// Tests
// =============================================================================
