//! Policy settings and their validation.
//!
//! Settings arrive as JSON, either on their own when the host loads the
//! policy or embedded in every admission request. They are validated in a
//! fixed order and the first failing rule is reported, so a document with
//! several problems always yields the same message.

mod annotation_value;
mod error;
mod key_template;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, de::Unexpected};
use serde_json::Value;
use serde_with::{DefaultOnNull, serde_as};
use snafu::{IntoError, ResultExt, ensure};

pub use self::{
    annotation_value::AnnotationValue, error::Error, key_template::AnnotationKeyTemplate,
};

/// Configuration of the policy.
///
/// Missing or `null` fields take their default. Empty strings are then
/// refused by [`Settings::validate`] with the message of the matching rule.
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Settings {
    /// Name of the container environment variable holding a log path.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub env_key: String,

    /// Annotation key of the first log path.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub annotation_base: String,

    /// Key template of the second and later log paths.
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub annotation_ext_format: AnnotationKeyTemplate,

    /// Constant annotations added to every mutated workload. `null` values
    /// are accepted and skipped.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[serde_as(as = "DefaultOnNull")]
    pub additional_annotations: BTreeMap<String, Option<AnnotationValue>>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub pod_owner_filter: PodOwnerFilter,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull")]
    pub empty_containers: EmptyContainers,
}

impl Settings {
    /// Parses and validates a settings document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSettings`] when `raw` is not a settings
    /// object, or the error of the first validation rule that fails.
    pub fn from_slice(raw: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(raw).context(error::MalformedSettingsSnafu)?;
        Self::from_value(&value)
    }

    /// Same as [`Settings::from_slice`] for settings embedded in a request.
    /// A `null` document counts as an empty one, any other document must be
    /// an object.
    ///
    /// # Errors
    ///
    /// See [`Settings::from_slice`].
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        let settings = match value {
            Value::Null => Self::default(),
            Value::Object(_) => Self::deserialize(value).context(error::MalformedSettingsSnafu)?,
            other => {
                let source: serde_json::Error =
                    serde::de::Error::invalid_type(unexpected(other), &"a settings object");
                return Err(error::MalformedSettingsSnafu.into_error(source));
            }
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the validation rules in order and reports the first failure.
    ///
    /// # Errors
    ///
    /// Returns the error of the first rule that does not hold.
    pub fn validate(&self) -> Result<(), Error> {
        ensure!(!self.env_key.is_empty(), error::EmptyEnvKeySnafu);
        ensure!(!self.annotation_base.is_empty(), error::EmptyAnnotationBaseSnafu);
        ensure!(!self.annotation_ext_format.is_empty(), error::EmptyAnnotationExtFormatSnafu);

        for (key, value) in &self.additional_annotations {
            ensure!(!key.is_empty(), error::EmptyAdditionalAnnotationKeySnafu);
            ensure!(
                !value.as_ref().is_some_and(AnnotationValue::is_empty_string),
                error::EmptyAdditionalAnnotationValueSnafu
            );
        }

        ensure!(
            self.annotation_ext_format.placeholder_count() == 1,
            error::MissingExtFormatPlaceholderSnafu
        );
        Ok(())
    }

    /// Key of the log path at `index`: the base annotation for `0`, the
    /// rendered extension template otherwise.
    #[must_use]
    pub fn log_path_key(&self, index: usize) -> String {
        if index == 0 {
            self.annotation_base.clone()
        } else {
            self.annotation_ext_format.render(index)
        }
    }
}

/// Parses and validates a settings document.
///
/// # Errors
///
/// See [`Settings::from_slice`].
pub fn validate(raw: &[u8]) -> Result<Settings, Error> { Settings::from_slice(raw) }

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(value) => Unexpected::Bool(*value),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(value) => Unexpected::Str(value),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Which Pods the policy mutates.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PodOwnerFilter {
    /// Only Pods with a `ReplicaSet` owner reference, that is Pods created
    /// through a Deployment.
    #[default]
    ReplicaSet,

    /// Every Pod.
    Any,
}

/// What happens to a workload without containers.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyContainers {
    /// Treat it like a container without matching variables and add the
    /// logging-enabled marker.
    #[default]
    Fallback,

    /// Leave it untouched.
    Skip,
}
