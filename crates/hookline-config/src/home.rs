//! Derives the output paths shared by the built-in hook sinks.
//!
//! The hooks home directory houses the files the CLI sinks append to. Hooks
//! and tooling that inspect those files need to agree on the layout, so the
//! paths are derived here rather than in each sink.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::Config;
use crate::defaults::{EVENT_LOG_FILE_NAME, TOOL_SUMMARY_FILE_NAME, default_hooks_home};

/// Canonical paths for files written by the hook sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HooksHome {
    root: PathBuf,
    event_log_path: PathBuf,
    tool_summary_path: PathBuf,
}

impl HooksHome {
    /// Derives the hooks home from the shared configuration and ensures the
    /// directory exists.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDirError::CreateDirectory`] when the directory cannot be
    /// created.
    pub fn from_config(config: &Config) -> Result<Self, HomeDirError> {
        let root = config
            .hooks_home
            .clone()
            .unwrap_or_else(default_hooks_home)
            .into_std_path_buf();
        Self::at(root)
    }

    /// Uses `root` as the hooks home, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`HomeDirError::CreateDirectory`] when the directory cannot be
    /// created.
    pub fn at(path: impl Into<PathBuf>) -> Result<Self, HomeDirError> {
        let root: PathBuf = path.into();
        fs::create_dir_all(&root).map_err(|source| HomeDirError::CreateDirectory {
            path: root.clone(),
            source,
        })?;
        Ok(Self {
            event_log_path: root.join(EVENT_LOG_FILE_NAME),
            tool_summary_path: root.join(TOOL_SUMMARY_FILE_NAME),
            root,
        })
    }

    /// Directory holding sink output.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Path to the JSONL event log.
    #[must_use]
    pub fn event_log_path(&self) -> &Path {
        self.event_log_path.as_path()
    }

    /// Path to the tool-call summary log.
    #[must_use]
    pub fn tool_summary_path(&self) -> &Path {
        self.tool_summary_path.as_path()
    }
}

/// Errors raised while preparing the hooks home directory.
#[derive(Debug, Error)]
pub enum HomeDirError {
    /// Creating the hooks home directory failed.
    #[error("failed to prepare hooks home '{}': {source}", .path.display())]
    CreateDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
