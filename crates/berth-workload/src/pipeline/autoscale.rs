//! Horizontal autoscaler attachment.
//!
//! Binds min/max replica bounds to an existing primary workload. The
//! composer only calls this after the workload was actually built; there is
//! no code path that attaches a policy to nothing.

use berth_common::spec::AutoscaleConfig;
use berth_common::{
    naming, HasApiResource, ObjectMeta, ProviderHandle, ResourceOptions, ResourceRef,
    ResourceRequest,
};

use crate::k8s::{
    CrossVersionObjectReference, Deployment, HorizontalPodAutoscaler,
    HorizontalPodAutoscalerSpec, MetricSpec,
};

/// Default CPU utilization target when the policy does not set one.
const DEFAULT_CPU_UTILIZATION: u32 = 80;

/// Attach an autoscaling policy to the workload.
pub fn attach(
    name: &str,
    namespace: &str,
    policy: &AutoscaleConfig,
    provider: &ProviderHandle,
    workload: &ResourceRef,
) -> ResourceRequest<HorizontalPodAutoscaler> {
    let hpa = HorizontalPodAutoscaler::new(
        ObjectMeta::new(naming::autoscaler_name(name), namespace),
        HorizontalPodAutoscalerSpec {
            scale_target_ref: CrossVersionObjectReference {
                api_version: Deployment::API_VERSION.to_string(),
                kind: Deployment::KIND.to_string(),
                name: name.to_string(),
            },
            min_replicas: Some(policy.min_replicas.unwrap_or(1)),
            max_replicas: policy.max_replicas,
            metrics: vec![MetricSpec::cpu_utilization(
                policy.cpu_utilization.unwrap_or(DEFAULT_CPU_UTILIZATION),
            )],
        },
    );

    ResourceRequest::new(
        hpa,
        ResourceOptions::new(provider.clone()).with_depends_on([workload.clone()]),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn attach_with(policy: AutoscaleConfig) -> ResourceRequest<HorizontalPodAutoscaler> {
        attach(
            "api",
            "prod",
            &policy,
            &ProviderHandle::new("k8s"),
            &ResourceRef::new("Deployment", "api"),
        )
    }

    #[test]
    fn targets_the_deployment() {
        let request = attach_with(AutoscaleConfig {
            min_replicas: Some(2),
            max_replicas: 6,
            cpu_utilization: None,
        });
        let target = &request.resource.spec.scale_target_ref;
        assert_eq!(target.kind, "Deployment");
        assert_eq!(target.name, "api");
        assert_eq!(request.resource.metadata.name, "api-hpa");
    }

    #[test]
    fn min_defaults_to_one() {
        let request = attach_with(AutoscaleConfig {
            min_replicas: None,
            max_replicas: 4,
            cpu_utilization: None,
        });
        assert_eq!(request.resource.spec.min_replicas, Some(1));
        assert_eq!(request.resource.spec.max_replicas, 4);
    }

    #[test]
    fn cpu_target_defaults_to_80_percent() {
        let request = attach_with(AutoscaleConfig {
            min_replicas: None,
            max_replicas: 4,
            cpu_utilization: None,
        });
        let metric = &request.resource.spec.metrics[0];
        assert_eq!(
            metric.resource.as_ref().unwrap().target.average_utilization,
            Some(80)
        );
    }

    #[test]
    fn depends_on_the_workload() {
        let request = attach_with(AutoscaleConfig {
            min_replicas: None,
            max_replicas: 2,
            cpu_utilization: None,
        });
        assert_eq!(
            request.options.depends_on,
            vec![ResourceRef::new("Deployment", "api")]
        );
    }
}
