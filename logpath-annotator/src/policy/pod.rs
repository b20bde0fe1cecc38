use k8s_openapi::api::core::v1::Pod;
use serde::Deserialize;
use serde_json::Value;
use snafu::{OptionExt, ResultExt};

use super::{
    error::{self, Error},
    merge,
};
use crate::{
    annotations,
    ext::PodExt,
    protocol::ValidationResponse,
    settings::{PodOwnerFilter, Settings},
};

pub(super) fn handle(mut object: Value, settings: &Settings) -> Result<ValidationResponse, Error> {
    let pod = Pod::deserialize(&object).context(error::MalformedObjectSnafu)?;

    if settings.pod_owner_filter == PodOwnerFilter::ReplicaSet && !pod.is_owned_by_replica_set() {
        tracing::debug!("pod is not owned by a ReplicaSet, skipping");
        return Ok(ValidationResponse::accept());
    }

    let Some(env) = super::container_env(pod.first_container_env(), settings.empty_containers)
    else {
        tracing::debug!("pod has no containers, skipping");
        return Ok(ValidationResponse::accept());
    };

    let derivation = annotations::derive(&env, settings);
    if !derivation.mutated {
        return Ok(ValidationResponse::accept());
    }

    tracing::info!(
        annotations = derivation.annotations.len(),
        "annotating pod {}",
        pod.metadata.name.as_deref().unwrap_or_default()
    );
    let root = object.as_object_mut().context(error::InvalidObjectSnafu { what: "pod object" })?;
    merge::merge_annotations(root, derivation.annotations);
    Ok(ValidationResponse::mutate(object))
}
