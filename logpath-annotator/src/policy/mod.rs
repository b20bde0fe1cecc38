//! Admission entry points.
//!
//! [`validate`] evaluates one admission request: it reads the settings
//! carried by the request, routes Pods and Deployments to their handler and
//! admits every other kind unchanged. [`validate_settings`] is called by the
//! host when the policy is loaded.

mod deployment;
mod error;
mod merge;
mod pod;

use logpath_annotator_base::consts::{REJECT_CODE, k8s::kinds};
use snafu::ResultExt;

pub use self::error::Error;
use crate::{
    env::ContainerEnvSnapshot,
    protocol::{SettingsValidationResponse, ValidationRequest, ValidationResponse},
    settings::{EmptyContainers, Settings},
};

/// Evaluates a serialized [`ValidationRequest`].
///
/// Every failure, including a payload that is not a request, is answered
/// with a rejection carrying status code 400.
#[must_use]
pub fn validate(payload: &[u8]) -> ValidationResponse {
    let outcome = serde_json::from_slice::<ValidationRequest>(payload)
        .context(error::MalformedRequestSnafu)
        .and_then(evaluate);
    into_response(outcome)
}

/// Evaluates an already parsed [`ValidationRequest`].
#[must_use]
pub fn validate_request(request: ValidationRequest) -> ValidationResponse {
    into_response(evaluate(request))
}

/// Validates a serialized settings document.
#[must_use]
pub fn validate_settings(payload: &[u8]) -> SettingsValidationResponse {
    tracing::info!("validating settings");

    match Settings::from_slice(payload) {
        Ok(_) => SettingsValidationResponse::accept(),
        Err(err) => {
            tracing::warn!(error = %err, "rejecting settings");
            SettingsValidationResponse::reject(format!("Provided settings are not valid: {err}"))
        }
    }
}

fn evaluate(request: ValidationRequest) -> Result<ValidationResponse, Error> {
    let ValidationRequest { request, settings } = request;
    let settings = Settings::from_value(&settings)?;

    let kind = request.kind.kind.as_str();
    tracing::debug!(uid = %request.uid, kind, "evaluating admission request");

    if kind.eq_ignore_ascii_case(kinds::POD) {
        pod::handle(request.object, &settings)
    } else if kind.eq_ignore_ascii_case(kinds::DEPLOYMENT) {
        deployment::handle(request.object, &settings)
    } else {
        Ok(ValidationResponse::accept())
    }
}

fn into_response(outcome: Result<ValidationResponse, Error>) -> ValidationResponse {
    outcome.unwrap_or_else(|err| {
        tracing::warn!(error = %err, "rejecting admission request");
        ValidationResponse::reject(err.to_string(), REJECT_CODE)
    })
}

/// The environment the annotations are derived from, or `None` when the
/// workload is left untouched.
fn container_env(
    first_container: Option<ContainerEnvSnapshot>,
    empty_containers: EmptyContainers,
) -> Option<ContainerEnvSnapshot> {
    match (first_container, empty_containers) {
        (Some(env), _) => Some(env),
        (None, EmptyContainers::Fallback) => Some(ContainerEnvSnapshot::default()),
        (None, EmptyContainers::Skip) => None,
    }
}

#[cfg(test)]
mod tests;
