//! Derivation of the annotations written onto a workload.

use std::collections::BTreeMap;

use logpath_annotator_base::consts::k8s::annotations::{LOG_ENABLED, LOG_ENABLED_VALUE};

use crate::{env::ContainerEnvSnapshot, settings::Settings};

/// Annotation keys and values produced for one workload.
pub type AnnotationSet = BTreeMap<String, String>;

/// Result of [`derive`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Derivation {
    pub annotations: AnnotationSet,

    /// Whether the workload has to be rewritten with `annotations`.
    pub mutated: bool,
}

/// Builds the annotations for a container environment.
///
/// Every value of `settings.env_key` becomes a log path: the first one is
/// stored under `annotation_base`, the `n`-th following one under
/// `annotation_ext_format` rendered with `n`. Without any log path the
/// logging-enabled marker is emitted instead. Additional annotations are
/// applied last and win over derived keys of the same name.
#[must_use]
pub fn derive(env: &ContainerEnvSnapshot, settings: &Settings) -> Derivation {
    let mut annotations: AnnotationSet = env
        .values_of(&settings.env_key)
        .enumerate()
        .map(|(index, path)| (settings.log_path_key(index), path.to_string()))
        .collect();

    if annotations.is_empty() {
        annotations = AnnotationSet::from([(LOG_ENABLED.to_string(), LOG_ENABLED_VALUE.to_string())]);
    }

    annotations.extend(settings.additional_annotations.iter().filter_map(|(key, value)| {
        value.as_ref().map(|value| (key.clone(), value.to_string()))
    }));

    let mutated = !annotations.is_empty();
    Derivation { annotations, mutated }
}
