//! Admission policy that annotates Pods and Deployments with log paths.
//!
//! The first container of a workload is searched for a configured
//! environment variable. Every occurrence becomes a log path annotation and a
//! workload without one is marked with `co.elastic.logs/enabled: "true"`.
//! Operator supplied constant annotations are merged on top.
//!
//! The entry points are [`policy::validate`] and [`policy::validate_settings`].

pub mod annotations;
pub mod cli;
pub mod config;
pub mod env;
pub mod ext;
pub mod policy;
pub mod protocol;
pub mod settings;
