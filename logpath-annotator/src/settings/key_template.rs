use std::fmt;

use logpath_annotator_base::consts::EXT_FORMAT_PLACEHOLDER;
use serde::{Deserialize, Serialize};

/// Template for the keys of the second and later log paths, for example
/// `co_elastic_logs_path_ext_%d`.
///
/// `%d` is replaced by the index of the log path, `%%` stands for a literal
/// `%`, and any other `%` sequence is kept as written. Templates are
/// rendered by substitution only; no general purpose formatter is involved.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AnnotationKeyTemplate(String);

impl AnnotationKeyTemplate {
    #[must_use]
    pub fn as_str(&self) -> &str { self.0.as_str() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Number of `%d` placeholders. Valid settings carry exactly one.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.segments().filter(|segment| matches!(segment, Segment::Placeholder)).count()
    }

    /// Renders the key for the log path at `index`.
    #[must_use]
    pub fn render(&self, index: usize) -> String {
        let index = index.to_string();
        self.segments().fold(String::with_capacity(self.0.len() + index.len()), |mut key, segment| {
            match segment {
                Segment::Literal(text) => key.push_str(text),
                Segment::Percent => key.push('%'),
                Segment::Placeholder => key.push_str(&index),
            }
            key
        })
    }

    fn segments(&self) -> Segments<'_> { Segments { rest: &self.0 } }
}

impl From<&str> for AnnotationKeyTemplate {
    fn from(template: &str) -> Self { Self(template.to_string()) }
}

impl From<String> for AnnotationKeyTemplate {
    fn from(template: String) -> Self { Self(template) }
}

impl fmt::Display for AnnotationKeyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Segment<'a> {
    Literal(&'a str),
    Percent,
    Placeholder,
}

struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        if let Some(rest) = self.rest.strip_prefix(EXT_FORMAT_PLACEHOLDER) {
            self.rest = rest;
            return Some(Segment::Placeholder);
        }
        if let Some(rest) = self.rest.strip_prefix("%%") {
            self.rest = rest;
            return Some(Segment::Percent);
        }

        // literal text runs up to the next '%', the first char is always consumed
        let end = self
            .rest
            .char_indices()
            .skip(1)
            .find(|(_, ch)| *ch == '%')
            .map_or(self.rest.len(), |(pos, _)| pos);
        let (literal, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Segment::Literal(literal))
    }
}
