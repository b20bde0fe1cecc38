use serde_json::{Map, Value};
use snafu::OptionExt;

use super::error::{self, Error};
use crate::annotations::AnnotationSet;

/// Writes `annotations` into `metadata.annotations` of `owner`.
///
/// Existing annotations are kept unless a key is overwritten. `metadata` and
/// `annotations` are created when missing or not objects. Nothing else in
/// `owner` is touched.
pub(super) fn merge_annotations(owner: &mut Map<String, Value>, annotations: AnnotationSet) {
    let mut metadata = take_object(owner, "metadata");
    let mut existing = take_object(&mut metadata, "annotations");
    existing.extend(annotations.into_iter().map(|(key, value)| (key, Value::String(value))));

    let _previous = metadata.insert("annotations".to_string(), Value::Object(existing));
    let _previous = owner.insert("metadata".to_string(), Value::Object(metadata));
}

/// The object stored under `key`, or [`Error::InvalidObject`] naming `what`
/// when it is missing or not an object.
pub(super) fn child_object<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
    what: &'static str,
) -> Result<&'a mut Map<String, Value>, Error> {
    parent.get_mut(key).and_then(Value::as_object_mut).context(error::InvalidObjectSnafu { what })
}

/// Moves the object stored under `key` out of `parent`, leaving `null` in its
/// place. Missing and non-object values yield an empty object.
fn take_object(parent: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match parent.get_mut(key).map(Value::take) {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
