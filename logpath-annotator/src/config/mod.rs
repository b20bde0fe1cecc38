//! Configuration of the command-line host.
//!
//! Policy settings travel with each request; this file only controls how
//! the host itself behaves, which today means logging.

mod error;

use std::path::{Path, PathBuf};

use logpath_annotator_cli::config::LogConfig;
use resolve_path::PathResolveExt;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

pub use self::error::Error;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// The first existing file among the default path and the fallback
    /// directories, or the default path when none exists.
    #[must_use]
    pub fn search_config_file_path() -> PathBuf {
        let paths = std::iter::once(Self::default_path())
            .chain(logpath_annotator_base::fallback_project_config_directories().into_iter().map(
                |mut path| {
                    path.push(logpath_annotator_base::CLI_CONFIG_NAME);
                    path
                },
            ))
            .collect::<Vec<_>>();
        for path in paths {
            let Ok(exists) = path.try_exists() else {
                continue;
            };
            if exists {
                return path;
            }
        }
        Self::default_path()
    }

    #[inline]
    #[must_use]
    pub fn default_path() -> PathBuf {
        [
            logpath_annotator_base::PROJECT_CONFIG_DIR.to_path_buf(),
            PathBuf::from(logpath_annotator_base::CLI_CONFIG_NAME),
        ]
        .into_iter()
        .collect()
    }

    /// Loads the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the path cannot be resolved, read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut config: Self = {
            let path =
                path.as_ref().try_resolve().map(|path| path.to_path_buf()).with_context(|_| {
                    error::ResolveFilePathSnafu { file_path: path.as_ref().to_path_buf() }
                })?;
            let data =
                std::fs::read(&path).context(error::OpenConfigSnafu { filename: path.clone() })?;
            serde_yaml::from_slice(&data).context(error::ParseConfigSnafu { filename: path })?
        };

        config.log.file_path = config
            .log
            .file_path
            .map(|path| {
                path.try_resolve()
                    .map(|resolved| resolved.to_path_buf())
                    .with_context(|_| error::ResolveFilePathSnafu { file_path: path.clone() })
            })
            .transpose()?;

        Ok(config)
    }

    /// Loads the searched configuration file, or the defaults when no file
    /// exists.
    ///
    /// # Errors
    ///
    /// Fails when an existing file cannot be loaded.
    pub fn load_or_default() -> Result<Self, Error> {
        let path = Self::search_config_file_path();
        if path.try_exists().unwrap_or(false) { Self::load(path) } else { Ok(Self::default()) }
    }

    /// The default configuration as YAML.
    ///
    /// # Errors
    ///
    /// Fails only if the configuration cannot be serialized.
    pub fn template_basic() -> Result<String, Error> {
        serde_yaml::to_string(&Self::default()).context(error::SerializeConfigSnafu)
    }
}
