use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::debug;

use crate::internal::error::Result;
use crate::internal::logger::{FormatOptions, Logger};
use crate::internal::output::{self, SharedStream};
use crate::internal::severity::Severity;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable prefix, e.g. `MINORI_LEVEL=warn`.
pub const ENV_PREFIX: &str = "MINORI";

/// Config file looked up in the working directory by [`LoggingConfig::load`].
pub const DEFAULT_CONFIG_FILE: &str = "minori";

/// `output_path` value selecting standard error.
pub const STDERR_OUTPUT: &str = "stderr";

/// `output_path` value selecting standard output.
pub const STDOUT_OUTPUT: &str = "stdout";

pub fn get_version_info() -> String {
    format!("minori version {}", VERSION)
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: Severity,
    #[serde(default = "default_true")]
    pub color: bool,
    #[serde(default)]
    pub include_caller_tag: bool,
    /// `None` or `"stdout"` for standard output, `"stderr"`, or a file path.
    #[serde(default)]
    pub output_path: Option<String>,
    #[serde(default)]
    pub append_to_file: bool,
}

fn default_level() -> Severity {
    Severity::Debug
}
fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            color: true,
            include_caller_tag: false,
            output_path: None,
            append_to_file: false,
        }
    }
}

impl LoggingConfig {
    /// Defaults, then an optional `minori.{toml,yaml,json,...}` in the
    /// working directory, then `MINORI_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::build(File::with_name(DEFAULT_CONFIG_FILE).required(false))
    }

    /// Like [`LoggingConfig::load`], with an explicit file that must exist.
    /// Missing files and bad values surface as [`LogError::Config`](crate::LogError::Config).
    pub fn load_from(path: &str) -> Result<Self> {
        Self::build(File::with_name(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .set_default("level", "debug")?
            .set_default("color", true)?
            .set_default("include_caller_tag", false)?
            .set_default("append_to_file", false)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn format(&self) -> FormatOptions {
        FormatOptions {
            include_caller_tag: self.include_caller_tag,
            ansi: self.color,
        }
    }

    /// Open the configured destination.
    pub fn open_output(&self) -> Result<SharedStream> {
        let stream = match self.output_path.as_deref() {
            None | Some("") | Some(STDOUT_OUTPUT) => SharedStream::stdout(),
            Some(STDERR_OUTPUT) => SharedStream::stderr(),
            Some(path) => SharedStream::file(path, self.append_to_file)?,
        };
        Ok(stream)
    }

    /// Install level and destination as the process-wide defaults.
    pub fn apply(&self) -> Result<()> {
        let stream = self.open_output()?;
        output::set_default_threshold(self.level);
        output::set_default_stream(stream);
        debug!(
            target: "minori::config",
            level = %self.level,
            output = self.output_path.as_deref().unwrap_or(STDOUT_OUTPUT),
            "applied logging defaults"
        );
        Ok(())
    }

    /// Root logger using this config's format. Threshold and stream are
    /// left to the process-wide defaults.
    pub fn root(&self, name: impl Into<String>) -> Logger {
        Logger::root(name).with_format(self.format())
    }
}
