//! Extensions to the `k8s_openapi` workload types.
//!
//! They answer the two questions the policy asks of a workload: who owns it
//! and what the environment of its first container is.

mod deployment;
mod pod;

pub use self::{
    deployment::DeploymentExt,
    pod::{PodExt, PodSpecExt},
};
