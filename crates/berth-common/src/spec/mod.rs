//! Workload specification types.
//!
//! This module contains the configuration surface a caller fills in to have
//! the composer derive a coordinated resource set: the top-level
//! [`WorkloadSpec`], the pod configuration it embeds, and the optional
//! deployment/service/job/ingress/autoscale sections.

pub mod ingress;
pub mod job;
pub mod pod;
pub mod scaling;
pub mod toggle;
pub mod workload;

pub use ingress::{IngressClass, IngressConfig};
pub use job::{ConcurrencyPolicy, CronConfig, JobConfig};
pub use pod::{
    ContainerSecurityContext, ImagePullPolicy, LivenessProbeConfig, PodConfig, PodSecurityContext,
    PortMap, ProbesConfig, ResourcePolicy, ResourceQuantity, ResourceRequirements, RestartPolicy,
    Toleration, VolumeBinding, VolumeSource,
};
pub use scaling::AutoscaleConfig;
pub use toggle::Toggle;
pub use workload::{DeploymentConfig, ServiceConfig, VolumeMapping, WorkloadSpec};

use crate::error::Error;

/// Validate a value as a Kubernetes DNS label: lowercase alphanumeric and
/// `-`, starting with a lowercase letter, at most 63 characters.
pub(crate) fn validate_dns_label(value: &str, what: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::validation(format!("{what} cannot be empty")));
    }
    if value.len() > 63 {
        return Err(Error::validation(format!(
            "{what} '{value}' exceeds 63 character limit"
        )));
    }
    if !value.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(Error::validation(format!(
            "{what} '{value}' must start with lowercase letter"
        )));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(Error::validation(format!(
            "{what} '{value}' must be lowercase alphanumeric or '-'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dns_label_accepts_simple_names() {
        assert!(validate_dns_label("api-v2", "name").is_ok());
    }

    #[test]
    fn dns_label_rejects_uppercase_and_underscores() {
        assert!(validate_dns_label("MyApp", "name").is_err());
        assert!(validate_dns_label("my_app", "name").is_err());
    }

    #[test]
    fn dns_label_rejects_leading_digit_and_overlength() {
        assert!(validate_dns_label("1api", "name").is_err());
        assert!(validate_dns_label(&"a".repeat(64), "name").is_err());
    }
}
