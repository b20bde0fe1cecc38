use std::path::PathBuf;

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("{source}"), context(false))]
    Configuration { source: crate::config::Error },

    #[snafu(display("Failed to read input from {}, error: {source}", path.display()))]
    ReadInputFile { path: PathBuf, source: std::io::Error },

    #[snafu(display("Failed to read standard input, error: {source}"))]
    ReadStdin { source: std::io::Error },

    #[snafu(display("Failed to write stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to serialize response, error: {source}"))]
    SerializeResponse { source: serde_json::Error },
}
