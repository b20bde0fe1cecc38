use std::fmt;

use serde::{Deserialize, Serialize};

/// A value of `additional_annotations`.
///
/// Annotations are strings, but operators may write booleans and numbers in
/// the settings document. Each variant has a fixed rendering, see the
/// `Display` implementation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnnotationValue {
    Bool(bool),

    Integer(i64),

    /// Integers above `i64::MAX`.
    Unsigned(u64),

    Float(f64),

    String(String),

    /// Arrays and objects.
    Other(Box<serde_json::Value>),
}

impl AnnotationValue {
    /// Returns `true` for string values that are empty. Other variants are
    /// never considered empty.
    #[must_use]
    pub fn is_empty_string(&self) -> bool { matches!(self, Self::String(value) if value.is_empty()) }
}

impl fmt::Display for AnnotationValue {
    /// Renders the annotation string.
    ///
    /// Floats use fixed notation with six fractional digits (`1.5` renders
    /// as `1.500000`), integers render in base 10 and arrays or objects as
    /// compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Unsigned(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value:.6}"),
            Self::String(value) => f.write_str(value),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self { Self::String(value.to_string()) }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self { Self::Integer(value) }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self { Self::Float(value) }
}
