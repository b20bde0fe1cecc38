//! Wire types exchanged with the policy host.
//!
//! Requests and responses follow the JSON layout used by Kubewarden policy
//! hosts: a validation request wraps the admission request together with
//! the policy settings, and the policy answers with an accept, reject or
//! mutate response.

mod request;
mod response;

pub use self::{
    request::{GroupVersionKind, KubernetesAdmissionRequest, ValidationRequest},
    response::{SettingsValidationResponse, ValidationResponse},
};
