use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How hook diagnostics are rendered on stderr.
///
/// Parsed case-insensitively from `--log-format`, `HOOKLINE_LOG_FORMAT`, or
/// the `log_format` key of the configuration file.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per diagnostic, with event fields flattened.
    #[default]
    Json,
    /// Terse single-line text for interactive terminals.
    Compact,
}

/// Error returned when text names no [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
