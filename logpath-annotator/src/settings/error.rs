use snafu::Snafu;

/// Reasons a settings document is refused.
///
/// The display strings are part of the policy's observable behaviour: they
/// are returned verbatim to the host in rejection messages.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The document is not a JSON object of the expected shape.
    #[snafu(display("{source}"))]
    MalformedSettings { source: serde_json::Error },

    #[snafu(display("env_key cannot be empty"))]
    EmptyEnvKey,

    #[snafu(display("annotation_base cannot be empty"))]
    EmptyAnnotationBase,

    #[snafu(display("annotation_ext_format cannot be empty"))]
    EmptyAnnotationExtFormat,

    #[snafu(display("additional_annotations keys cannot be empty"))]
    EmptyAdditionalAnnotationKey,

    #[snafu(display("additional_annotations string values cannot be empty"))]
    EmptyAdditionalAnnotationValue,

    /// `annotation_ext_format` does not contain exactly one `%d`.
    #[snafu(display("annotation_ext_format must contain %d placeholder"))]
    MissingExtFormatPlaceholder,
}
