use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Verdict on an admission request.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct ValidationResponse {
    pub accepted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,

    /// The object to admit instead of the submitted one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutated_object: Option<Value>,
}

impl ValidationResponse {
    /// Admits the object as submitted.
    #[must_use]
    pub const fn accept() -> Self {
        Self { accepted: true, message: None, code: None, mutated_object: None }
    }

    /// Refuses the request.
    #[must_use]
    pub fn reject(message: impl Into<String>, code: u16) -> Self {
        Self { accepted: false, message: Some(message.into()), code: Some(code), mutated_object: None }
    }

    /// Admits `object` in place of the submitted object.
    #[must_use]
    pub fn mutate(object: Value) -> Self {
        Self { accepted: true, message: None, code: None, mutated_object: Some(object) }
    }

    #[must_use]
    pub const fn is_mutation(&self) -> bool { self.mutated_object.is_some() }
}

/// Verdict on a settings document.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SettingsValidationResponse {
    pub valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SettingsValidationResponse {
    #[must_use]
    pub const fn accept() -> Self { Self { valid: true, message: None } }

    #[must_use]
    pub fn reject(message: impl Into<String>) -> Self {
        Self { valid: false, message: Some(message.into()) }
    }
}
