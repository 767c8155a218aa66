//! Workload composition pipeline.
//!
//! Compiles a [`berth_common::spec::WorkloadSpec`] into a coordinated set of
//! Kubernetes resource requests: config/secret sources, a Deployment, batch
//! jobs, a Service, an Ingress binding, and a horizontal autoscaler. The
//! external orchestration engine owns diffing, apply ordering, and retries;
//! everything here is a single synchronous-in-structure pass whose only
//! await point is the secret-store boundary.
//!
//! # Usage
//!
//! ```rust,ignore
//! let composed = WorkloadComposer::new(&spec).compose(&store).await?;
//! if let Some(ref workload) = composed.workload {
//!     // hand workload/service/jobs requests to the engine
//! }
//! ```

pub mod composed;
pub mod composer;
pub mod k8s;
pub mod pipeline;

pub use composed::{ComposedJob, ComposedWorkload};
pub use composer::WorkloadComposer;
