//! Batch job configuration — one-shot jobs and cron-scheduled jobs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::pod::RestartPolicy;
use super::validate_dns_label;

/// Default post-completion retention for one-shot jobs: seven days.
pub const DEFAULT_JOB_TTL_SECONDS: i64 = 604_800;

/// Default retained run count (successful and failed) for scheduled jobs.
pub const DEFAULT_JOB_HISTORY_LIMIT: i32 = 1;

/// A batch workload derived from the pod configuration.
///
/// With a [`CronConfig`] the job becomes a scheduled job; without one it is
/// a one-shot job with post-completion retention.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JobConfig {
    /// Job resource name
    pub name: String,

    /// Virtual-host scheduling override; inherits the primary workload's
    /// class when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_virtual_host: Option<bool>,

    /// Cron schedule — when present a scheduled job is created instead of a
    /// one-shot job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<CronConfig>,

    /// Container args for this job
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Restart policy (defaults to Never)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restart_policy: Option<RestartPolicy>,

    /// Seconds to retain a finished one-shot job (defaults to seven days)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_seconds_after_finished: Option<i64>,
}

impl JobConfig {
    /// Validate the job configuration
    pub fn validate(&self) -> Result<(), Error> {
        validate_dns_label(&self.name, "job name")?;
        if let Some(ref cron) = self.cron {
            cron.validate(&self.name)?;
        }
        Ok(())
    }
}

/// Cron schedule configuration for a scheduled job
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CronConfig {
    /// Cron schedule expression
    pub schedule: String,

    /// Failed runs to retain (defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_jobs_history_limit: Option<i32>,

    /// Successful runs to retain (defaults to 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub successful_jobs_history_limit: Option<i32>,

    /// What to do when a run is still active at the next trigger
    pub concurrency_policy: ConcurrencyPolicy,
}

impl CronConfig {
    /// Validate the cron configuration
    pub fn validate(&self, job_name: &str) -> Result<(), Error> {
        if self.schedule.trim().is_empty() {
            return Err(Error::validation(format!(
                "job '{job_name}': cron schedule cannot be empty"
            )));
        }
        Ok(())
    }
}

/// Concurrency policy for scheduled jobs
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// Skip the new run while the previous one is active
    Forbid,
    /// Allow concurrent runs
    Allow,
    /// Cancel the active run and replace it
    Replace,
}

impl std::fmt::Display for ConcurrencyPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbid => write!(f, "Forbid"),
            Self::Allow => write!(f, "Allow"),
            Self::Replace => write!(f, "Replace"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn one_shot(name: &str) -> JobConfig {
        JobConfig {
            name: name.to_string(),
            use_virtual_host: None,
            cron: None,
            args: None,
            restart_policy: None,
            ttl_seconds_after_finished: None,
        }
    }

    #[test]
    fn valid_job_passes() {
        assert!(one_shot("db-migrate").validate().is_ok());
    }

    #[test]
    fn invalid_job_name_fails() {
        assert!(one_shot("Db_Migrate").validate().is_err());
    }

    #[test]
    fn empty_cron_schedule_fails() {
        let mut job = one_shot("report");
        job.cron = Some(CronConfig {
            schedule: "".to_string(),
            failed_jobs_history_limit: None,
            successful_jobs_history_limit: None,
            concurrency_policy: ConcurrencyPolicy::Forbid,
        });
        let err = job.validate().unwrap_err();
        assert!(err.to_string().contains("cron schedule"));
    }

    #[test]
    fn concurrency_policy_displays_k8s_values() {
        assert_eq!(ConcurrencyPolicy::Forbid.to_string(), "Forbid");
        assert_eq!(ConcurrencyPolicy::Allow.to_string(), "Allow");
        assert_eq!(ConcurrencyPolicy::Replace.to_string(), "Replace");
    }
}
