use k8s_openapi::api::apps::v1::Deployment;
use serde::Deserialize;
use serde_json::Value;
use snafu::{OptionExt, ResultExt};

use super::{
    error::{self, Error},
    merge,
};
use crate::{
    annotations,
    ext::{DeploymentExt, PodSpecExt},
    protocol::ValidationResponse,
    settings::Settings,
};

/// Annotates the Pod template of a Deployment. Deployments are never
/// filtered by owner.
pub(super) fn handle(mut object: Value, settings: &Settings) -> Result<ValidationResponse, Error> {
    let deployment = Deployment::deserialize(&object).context(error::MalformedObjectSnafu)?;

    let Some(pod_spec) = deployment.template_pod_spec() else {
        tracing::debug!("deployment has no pod template spec, skipping");
        return Ok(ValidationResponse::accept());
    };

    let Some(env) = super::container_env(pod_spec.first_container_env(), settings.empty_containers)
    else {
        tracing::debug!("deployment has no containers, skipping");
        return Ok(ValidationResponse::accept());
    };

    let derivation = annotations::derive(&env, settings);
    if !derivation.mutated {
        return Ok(ValidationResponse::accept());
    }

    tracing::info!(
        annotations = derivation.annotations.len(),
        "annotating pod template of deployment {}",
        deployment.metadata.name.as_deref().unwrap_or_default()
    );
    let root =
        object.as_object_mut().context(error::InvalidObjectSnafu { what: "deployment object" })?;
    let spec = merge::child_object(root, "spec", "deployment spec")?;
    let template = merge::child_object(spec, "template", "deployment template")?;
    merge::merge_annotations(template, derivation.annotations);
    Ok(ValidationResponse::mutate(object))
}
