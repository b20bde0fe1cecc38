use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to evaluate one admission request with the given settings.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ValidationRequest {
    pub request: KubernetesAdmissionRequest,

    /// Policy settings, validated on every evaluation.
    pub settings: Value,
}

/// The parts of a Kubernetes `AdmissionRequest` the policy reads. Unknown
/// fields are ignored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KubernetesAdmissionRequest {
    pub uid: String,

    pub kind: GroupVersionKind,

    pub operation: String,

    pub name: String,

    pub namespace: String,

    /// The object being admitted, as submitted.
    pub object: Value,

    #[serde(skip_serializing_if = "Value::is_null")]
    pub old_object: Value,

    pub dry_run: bool,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct GroupVersionKind {
    pub group: String,

    pub version: String,

    pub kind: String,
}
