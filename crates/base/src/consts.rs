//! Constants shared by the policy and its command-line host.

pub mod k8s {
    //! Kubernetes names the policy matches on or writes.

    pub mod annotations {
        //! Annotations written by the policy.

        /// Annotation emitted when no container environment variable matches
        /// the configured key.
        pub const LOG_ENABLED: &str = "co.elastic.logs/enabled";

        /// Value of [`LOG_ENABLED`].
        pub const LOG_ENABLED_VALUE: &str = "true";
    }

    pub mod kinds {
        //! Resource kinds, as they appear in `kind` fields.

        pub const POD: &str = "Pod";
        pub const DEPLOYMENT: &str = "Deployment";

        /// Owner kind of Pods created through a Deployment.
        pub const REPLICA_SET: &str = "ReplicaSet";
    }
}

/// Status code attached to every rejected admission request.
pub const REJECT_CODE: u16 = 400;

/// Integer placeholder recognised in `annotation_ext_format`.
pub const EXT_FORMAT_PLACEHOLDER: &str = "%d";
