//! The `logpath-annotator` command-line host.
//!
//! It plays the role of the policy host for a single evaluation: the request
//! or settings document is read from a file or standard input, evaluated,
//! and the JSON response is written to standard output.
//!
//! # Examples
//!
//! ```bash
//! # Evaluate an admission request
//! logpath-annotator validate --request request.json
//!
//! # Check a settings document before deploying the policy
//! logpath-annotator validate-settings < settings.json
//! ```

pub mod error;
mod validate;

use std::{
    io::{Read, Write},
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser, Subcommand};
use logpath_annotator_base::{CLI_PROGRAM_NAME, PROJECT_VERSION};
use serde::Serialize;
use snafu::ResultExt;

pub use self::error::Error;
use self::validate::{ValidateCommand, ValidateSettingsCommand};
use crate::config::Config;

#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    about = "Annotates Pods and Deployments with the log paths declared in their environment.",
    long_about = "Logpath Annotator is an admission policy that reads the environment of the \
                  first container of a Pod or Deployment, turns every occurrence of a \
                  configured variable into a log path annotation, and falls back to a \
                  logging-enabled marker when there is none. This binary evaluates single \
                  requests and settings documents.",
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[clap(
        long = "config",
        short = 'c',
        env = "LOGPATH_ANNOTATOR_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to \
                ~/.config/logpath-annotator/config.yaml or LOGPATH_ANNOTATOR_CONFIG_FILE_PATH \
                env var."
    )]
    config_file: Option<PathBuf>,

    #[clap(
        long = "log-level",
        env = "LOGPATH_ANNOTATOR_LOG_LEVEL",
        help = "Set the logging level (e.g., info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,
}

#[derive(Clone, Subcommand)]
pub enum Commands {
    #[command(about = "Display version information")]
    Version,

    #[command(about = "Generate shell completion script for the specified shell (bash, zsh, fish)")]
    Completions { shell: clap_complete::Shell },

    #[command(about = "Output the default configuration in YAML format")]
    DefaultConfig,

    #[command(
        alias = "v",
        about = "Evaluate an admission request and print the validation response"
    )]
    Validate(ValidateCommand),

    #[command(
        alias = "s",
        about = "Validate a settings document and print the settings validation response"
    )]
    ValidateSettings(ValidateSettingsCommand),
}

impl Default for Cli {
    fn default() -> Self { Self::parse() }
}

impl Cli {
    /// Loads the host configuration and applies the `--log-level` override.
    ///
    /// An explicit `--config` file must exist; without one the searched
    /// default is used when present.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = match &self.config_file {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default()?,
        };

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }

        Ok(config)
    }

    /// Runs the selected command and returns the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an `Error` when the configuration cannot be loaded, the input
    /// cannot be read or the response cannot be written.
    pub fn run(self) -> Result<i32, Error> {
        match self.commands {
            Some(Commands::Version) => {
                let version = format!("{CLI_PROGRAM_NAME} {PROJECT_VERSION}\n");
                std::io::stdout().write_all(version.as_bytes()).context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            Some(Commands::Completions { shell }) => {
                let mut app = Self::command();
                let bin_name = app.get_name().to_string();
                clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
                return Ok(0);
            }
            Some(Commands::DefaultConfig) => {
                let template = Config::template_basic()?;
                std::io::stdout().write_all(template.as_bytes()).context(error::WriteStdoutSnafu)?;
                return Ok(0);
            }
            _ => {}
        }

        let config = self.load_config()?;
        config.log.registry();

        match self.commands {
            Some(Commands::Validate(cmd)) => cmd.run()?,
            Some(Commands::ValidateSettings(cmd)) => cmd.run()?,
            _ => {
                let help = Self::command().render_long_help().ansi().to_string();
                std::io::stderr().write_all(help.as_bytes()).context(error::WriteStdoutSnafu)?;
                return Ok(-1);
            }
        }

        Ok(0)
    }
}

/// Reads the whole of `path`, or standard input when no path is given.
fn read_payload(path: Option<&Path>) -> Result<Vec<u8>, Error> {
    match path {
        Some(path) => {
            std::fs::read(path).context(error::ReadInputFileSnafu { path: path.to_path_buf() })
        }
        None => {
            let mut payload = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut payload)
                .map(|_| payload)
                .context(error::ReadStdinSnafu)
        }
    }
}

/// Writes `value` as one line of JSON to standard output.
fn write_json<T: Serialize>(value: &T) -> Result<(), Error> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, value).context(error::SerializeResponseSnafu)?;
    stdout.write_all(b"\n").context(error::WriteStdoutSnafu)
}
