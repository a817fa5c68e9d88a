//! Shared configuration for the hookline toolchain.
//!
//! Configuration is layered by `ortho_config`: compiled defaults, then an
//! optional TOML file (`--config-path` or `HOOKLINE_CONFIG_PATH`), then
//! `HOOKLINE_*` environment variables, then command-line flags. The CLI and
//! any embedding host read the same [`Config`] so diagnostics and sink output
//! land in the same places.

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

mod defaults;
mod home;
mod logging;

pub use defaults::{
    DEFAULT_HOME_DIR_NAME, DEFAULT_LOG_FILTER, EVENT_LOG_FILE_NAME, TOOL_SUMMARY_FILE_NAME,
    default_hooks_home, default_log_filter, default_log_filter_string, default_log_format,
};
pub use home::{HomeDirError, HooksHome};
pub use logging::{LogFormat, LogFormatParseError};

/// Runtime configuration for hookline binaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HOOKLINE")]
pub struct Config {
    /// `tracing` filter expression applied to diagnostics.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for diagnostics.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Directory receiving sink output. Falls back to
    /// [`default_hooks_home`] when unset.
    pub hooks_home: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            hooks_home: None,
        }
    }
}

impl Config {
    /// Filter expression for diagnostics.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Output format for diagnostics.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
