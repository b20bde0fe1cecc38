use snafu::Snafu;

/// Reasons an admission request is rejected.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{source}"))]
    MalformedRequest { source: serde_json::Error },

    #[snafu(display("{source}"), context(false))]
    InvalidSettings { source: crate::settings::Error },

    /// The object cannot be read as the kind named in the request.
    #[snafu(display("{source}"))]
    MalformedObject { source: serde_json::Error },

    /// A field the mutation has to descend into is not an object.
    #[snafu(display("Invalid {what}"))]
    InvalidObject { what: &'static str },
}
