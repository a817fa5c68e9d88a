use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Directory name used under the user's home when no hooks home is configured.
pub const DEFAULT_HOME_DIR_NAME: &str = ".hookline";

/// File receiving one JSON line per event from the JSONL sink.
pub const EVENT_LOG_FILE_NAME: &str = "hooks.jsonl";

/// File receiving one summary line per finished tool call.
pub const TOOL_SUMMARY_FILE_NAME: &str = "hooks-tool-calls.log";

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}

/// Computes the fallback hooks home: `$HOME/.hookline`, or the current
/// directory when no home directory can be determined.
#[must_use]
pub fn default_hooks_home() -> Utf8PathBuf {
    dirs::home_dir()
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
        .map_or_else(
            || Utf8PathBuf::from("."),
            |home| home.join(DEFAULT_HOME_DIR_NAME),
        )
}
