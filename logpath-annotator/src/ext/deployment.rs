use k8s_openapi::api::{apps::v1::Deployment, core::v1::PodSpec};

pub trait DeploymentExt {
    /// The spec of the Pod template, `None` when the Deployment has no spec
    /// or its template has none.
    fn template_pod_spec(&self) -> Option<&PodSpec>;
}

impl DeploymentExt for Deployment {
    fn template_pod_spec(&self) -> Option<&PodSpec> { self.spec.as_ref()?.template.spec.as_ref() }
}
