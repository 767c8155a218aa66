//! Compilation pipeline stages, one module per derived resource kind.

pub mod autoscale;
pub mod config_secret;
pub mod ingress;
pub mod jobs;
pub mod pod_template;
pub mod service;
