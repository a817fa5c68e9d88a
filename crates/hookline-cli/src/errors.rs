//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use hookline::HookError;
use hookline_config::HomeDirError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    HooksHome(#[from] HomeDirError),
    #[error("failed to read hook payload: {0}")]
    ReadPayload(#[from] HookError),
    #[error("failed to serialise event summary: {0}")]
    SerialiseSummary(serde_json::Error),
    #[error("failed to write event summary: {0}")]
    WriteSummary(io::Error),
}

impl AppError {
    /// Exit status reported for this error. Usage errors follow the clap
    /// convention of 2.
    pub(crate) const fn exit_code(&self) -> u8 {
        match self {
            Self::CliUsage(_) => 2,
            _ => 1,
        }
    }
}
