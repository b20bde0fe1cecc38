//! Pieces shared by the `logpath-annotator` command-line host that do not
//! depend on the policy itself.

pub mod config;
