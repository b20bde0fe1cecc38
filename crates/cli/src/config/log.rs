//! Logging configuration for the policy host.
//!
//! The host prints admission responses on standard output, so the defaults
//! keep log output on standard error. `LogConfig::registry` installs the
//! global `tracing` subscriber the policy code emits into.
use std::{fs::OpenOptions, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing_subscriber::{
    Layer, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Where and how verbosely the host writes its logs.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LogConfig {
    /// Optional file that log lines are appended to.
    #[serde(default = "LogConfig::default_file_path")]
    pub file_path: Option<PathBuf>,

    /// Emit logs to `journald`.
    #[serde(default = "LogConfig::default_emit_journald")]
    pub emit_journald: bool,

    /// Emit logs to standard output. Off by default because standard output
    /// carries the admission response.
    #[serde(default = "LogConfig::default_emit_stdout")]
    pub emit_stdout: bool,

    /// Emit logs to standard error.
    #[serde(default = "LogConfig::default_emit_stderr")]
    pub emit_stderr: bool,

    /// Line format of the text outputs (ignored by `journald`).
    #[serde(default)]
    pub format: LogFormat,

    /// The minimum level that is recorded.
    #[serde(default = "LogConfig::default_log_level")]
    #[serde_as(as = "DisplayFromStr")]
    pub level: tracing::Level,
}

impl Default for LogConfig {
    /// `INFO` level, standard error only, compact lines.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use logpath_annotator_cli::config::LogConfig;
    /// use tracing::Level;
    ///
    /// let config = LogConfig::default();
    /// assert_eq!(config.level, Level::INFO);
    /// assert!(config.emit_stderr);
    /// assert!(!config.emit_stdout);
    /// assert!(!config.emit_journald);
    /// assert!(config.file_path.is_none());
    /// ```
    fn default() -> Self {
        Self {
            file_path: Self::default_file_path(),
            emit_journald: Self::default_emit_journald(),
            emit_stdout: Self::default_emit_stdout(),
            emit_stderr: Self::default_emit_stderr(),
            format: LogFormat::default(),
            level: Self::default_log_level(),
        }
    }
}

impl LogConfig {
    #[inline]
    #[must_use]
    pub const fn default_log_level() -> tracing::Level { tracing::Level::INFO }

    #[inline]
    #[must_use]
    pub const fn default_file_path() -> Option<PathBuf> { None }

    #[inline]
    #[must_use]
    pub const fn default_emit_journald() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stdout() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stderr() -> bool { true }

    /// Installs the global `tracing` subscriber described by this
    /// configuration.
    ///
    /// Outputs that cannot be opened (an unwritable file, a missing
    /// `journald` socket) are skipped.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been installed, as
    /// `tracing_subscriber::util::SubscriberInitExt::init()` does.
    pub fn registry(&self) {
        let Self { file_path, emit_journald, emit_stdout, emit_stderr, format, level } = self;

        let filter_layer = tracing_subscriber::filter::LevelFilter::from_level(*level);

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(emit_journald.then(|| LogDriver::Journald.layer(*format)))
            .with(file_path.clone().map(|path| LogDriver::File(path).layer(*format)))
            .with(emit_stdout.then(|| LogDriver::Stdout.layer(*format)))
            .with(emit_stderr.then(|| LogDriver::Stderr.layer(*format)))
            .init();
    }
}

/// Line format for the text log outputs.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One line per event.
    #[default]
    Compact,
    /// Multi-line, human oriented output.
    Pretty,
}

#[derive(Clone, Debug)]
enum LogDriver {
    Stdout,
    Stderr,
    Journald,
    File(PathBuf),
}

impl LogDriver {
    /// Builds the layer for this output, or `None` when the output cannot
    /// be opened.
    #[allow(clippy::type_repetition_in_bounds)]
    fn layer<S>(self, format: LogFormat) -> Option<Box<dyn Layer<S> + Send + Sync + 'static>>
    where
        S: tracing::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        let fmt = tracing_subscriber::fmt::layer().with_target(true);

        match (self, format) {
            (Self::Journald, _) => Some(Box::new(tracing_journald::layer().ok()?)),
            (Self::Stdout, LogFormat::Compact) => {
                Some(Box::new(fmt.compact().with_writer(std::io::stdout)))
            }
            (Self::Stdout, LogFormat::Pretty) => {
                Some(Box::new(fmt.pretty().with_writer(std::io::stdout)))
            }
            (Self::Stderr, LogFormat::Compact) => {
                Some(Box::new(fmt.compact().with_writer(std::io::stderr)))
            }
            (Self::Stderr, LogFormat::Pretty) => {
                Some(Box::new(fmt.pretty().with_writer(std::io::stderr)))
            }
            (Self::File(path), format) => {
                let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
                let fmt = fmt.with_ansi(false);
                match format {
                    LogFormat::Compact => Some(Box::new(fmt.compact().with_writer(file))),
                    LogFormat::Pretty => Some(Box::new(fmt.pretty().with_writer(file))),
                }
            }
        }
    }
}
