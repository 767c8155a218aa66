//! Shared types for the berth workload composer.
//!
//! This crate holds everything the composition pipeline and its callers have
//! in common: the `WorkloadSpec` configuration types, structured errors,
//! deterministic name derivation, host/domain helpers for ingress bindings,
//! and the engine-facing metadata types (`ObjectMeta`, `ResourceOptions`).
//!
//! Nothing in here talks to a cluster. The external orchestration engine owns
//! diffing, apply ordering, and retries; this crate only describes resources.

pub mod error;
pub mod meta;
pub mod naming;
pub mod secrets;
pub mod spec;
pub mod urls;

pub use error::Error;
pub use meta::{
    CustomTimeouts, HasApiResource, ObjectMeta, ProviderHandle, ResourceOptions, ResourceRef,
    ResourceRequest, ANNOTATION_SKIP_AWAIT,
};
pub use secrets::{MemorySecretStore, SecretStore, SecretValue};

/// Label carrying the workload name, matched by service selectors.
pub const LABEL_APP: &str = "app";

/// Label identifying resources managed by berth.
pub const LABEL_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Value for [`LABEL_MANAGED_BY`].
pub const LABEL_MANAGED_BY_BERTH: &str = "berth";

/// Label carrying the redeployment stamp on the primary workload.
pub const LABEL_TIME: &str = "time";
