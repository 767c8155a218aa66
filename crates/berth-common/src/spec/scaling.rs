//! Horizontal autoscaling bounds for the primary workload.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Autoscaling policy bound to the primary workload.
///
/// Only meaningful when a workload was actually created; the composer never
/// attaches it otherwise.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoscaleConfig {
    /// Minimum replicas (defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_replicas: Option<u32>,

    /// Maximum replicas
    pub max_replicas: u32,

    /// Target CPU utilization percentage (defaults to 80)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_utilization: Option<u32>,
}

impl AutoscaleConfig {
    /// Validate the autoscale bounds
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_replicas == 0 {
            return Err(Error::validation_for_field(
                "autoscale.maxReplicas",
                "maxReplicas must be greater than 0",
            ));
        }
        let min = self.min_replicas.unwrap_or(1);
        if min > self.max_replicas {
            return Err(Error::validation_for_field(
                "autoscale.minReplicas",
                format!(
                    "minReplicas ({min}) cannot exceed maxReplicas ({})",
                    self.max_replicas
                ),
            ));
        }
        if let Some(target) = self.cpu_utilization {
            if target == 0 || target > 100 {
                return Err(Error::validation_for_field(
                    "autoscale.cpuUtilization",
                    "target must be within 1..=100 percent",
                ));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_bounds_pass() {
        let cfg = AutoscaleConfig {
            min_replicas: Some(2),
            max_replicas: 5,
            cpu_utilization: None,
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn min_above_max_fails() {
        let cfg = AutoscaleConfig {
            min_replicas: Some(6),
            max_replicas: 5,
            cpu_utilization: None,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_max_fails() {
        let cfg = AutoscaleConfig {
            min_replicas: None,
            max_replicas: 0,
            cpu_utilization: None,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn utilization_over_100_fails() {
        let cfg = AutoscaleConfig {
            min_replicas: None,
            max_replicas: 3,
            cpu_utilization: Some(120),
        };
        assert!(cfg.validate().is_err());
    }
}
