//! Configuration loading helpers for the CLI.
//!
//! Configuration flags come before the subcommand. The split below hands
//! those flags to `ortho_config` and leaves the rest for clap.

use std::ffi::{OsStr, OsString};

use hookline_config::Config;
use ortho_config::OrthoConfig;

use crate::errors::AppError;

/// Flags understood by the configuration loader.
///
/// Keep in step with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--hooks-home",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the filtered configuration arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Stop,
}

fn classify(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    let flag = text.split_once('=').map_or(text.as_ref(), |(name, _)| name);
    if CONFIG_CLI_FLAGS.contains(&flag) {
        FlagAction::Include {
            needs_value: !text.contains('='),
        }
    } else {
        FlagAction::Stop
    }
}

/// Arguments split between the configuration loader and clap.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    /// Program name followed by the configuration flags and their values.
    pub(crate) config_arguments: Vec<OsString>,
    /// Program name followed by the subcommand and its arguments.
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits leading configuration flags from the command.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit::default();
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter();
    let mut command_arguments = vec![program.clone()];
    while let Some(argument) = remaining.next() {
        match classify(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                if needs_value {
                    config_arguments.extend(remaining.next().cloned());
                }
            }
            FlagAction::Stop => {
                command_arguments.push(argument.clone());
                command_arguments.extend(remaining.cloned());
                break;
            }
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}
