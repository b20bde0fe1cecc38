use k8s_openapi::{
    Metadata,
    api::core::v1::{Pod, PodSpec},
};
use logpath_annotator_base::consts::k8s::kinds;

use crate::env::ContainerEnvSnapshot;

pub trait PodExt {
    /// Whether one of the owner references has kind `ReplicaSet`.
    fn is_owned_by_replica_set(&self) -> bool;

    /// Environment of the first container, `None` when the Pod has no spec
    /// or no containers.
    fn first_container_env(&self) -> Option<ContainerEnvSnapshot>;
}

impl PodExt for Pod {
    fn is_owned_by_replica_set(&self) -> bool {
        self.metadata().owner_references.iter().flatten().any(|owner| owner.kind == kinds::REPLICA_SET)
    }

    fn first_container_env(&self) -> Option<ContainerEnvSnapshot> {
        self.spec.as_ref().and_then(PodSpecExt::first_container_env)
    }
}

pub trait PodSpecExt {
    fn first_container_env(&self) -> Option<ContainerEnvSnapshot>;
}

impl PodSpecExt for PodSpec {
    fn first_container_env(&self) -> Option<ContainerEnvSnapshot> {
        self.containers.first().map(ContainerEnvSnapshot::from_container)
    }
}
