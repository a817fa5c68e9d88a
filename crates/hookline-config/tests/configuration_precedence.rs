//! Behavioural tests for layered configuration precedence.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard};

use camino::Utf8PathBuf;
use once_cell::sync::Lazy;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use hookline_config::{Config, default_log_filter, default_log_format};
use ortho_config::OrthoConfig;

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

const ENV_KEYS: &[&str] = &[
    "HOOKLINE_LOG_FILTER",
    "HOOKLINE_LOG_FORMAT",
    "HOOKLINE_HOOKS_HOME",
    "HOOKLINE_CONFIG_PATH",
];

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    config_lines: RefCell<Vec<String>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _guard: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let guard = ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        let harness = Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("hookline")]),
            config_lines: RefCell::new(Vec::new()),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _guard: guard,
        };
        // Start every scenario from a clean environment.
        for key in ENV_KEYS {
            harness.clear_env(key);
        }
        harness
    }

    fn add_config_line(&self, line: String) {
        let path = self.temp_dir.path().join("hookline.toml");
        let mut lines = self.config_lines.borrow_mut();
        let first = lines.is_empty();
        lines.push(line);
        if let Err(error) = fs::write(&path, lines.join("\n")) {
            panic!("failed to write configuration: {error}");
        }
        if first {
            let mut args = self.cli_args.borrow_mut();
            args.push(OsString::from("--config-path"));
            args.push(path.into_os_string());
        }
    }

    fn remember(&self, key: &str) {
        let previous = std::env::var_os(key);
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn set_env(&self, key: &str, value: &str) {
        self.remember(key);
        // Overrides are restored in `Drop`; the mutex keeps scenarios from
        // observing each other's environment.
        unsafe { std::env::set_var(key, value) };
    }

    fn clear_env(&self, key: &str) {
        self.remember(key);
        unsafe { std::env::remove_var(key) };
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => {
                *self.loaded.borrow_mut() = Some(config);
            }
            Err(error) => {
                *self.error.borrow_mut() = Some(error.to_string());
            }
        }
    }

    fn loaded_config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            match value {
                Some(os_value) => unsafe { std::env::set_var(&key, os_value) },
                None => unsafe { std::env::remove_var(&key) },
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the log filter to \"{filter}\"")]
fn given_file_log_filter(harness: &Harness, filter: String) {
    harness.add_config_line(format!("log_filter = \"{filter}\""));
}

#[given("a configuration file setting the hooks home to \"{path}\"")]
fn given_file_hooks_home(harness: &Harness, path: String) {
    harness.add_config_line(format!("hooks_home = \"{path}\""));
}

#[given("the environment overrides the log filter to \"{filter}\"")]
fn given_environment_override(harness: &Harness, filter: String) {
    harness.set_env("HOOKLINE_LOG_FILTER", &filter);
}

#[when("the CLI sets the log filter to \"{filter}\"")]
fn when_cli_override(harness: &Harness, filter: String) {
    harness.push_cli_arg("--log-filter");
    harness.push_cli_arg(OsString::from(&filter));
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the log filter to \"{filter}\"")]
fn then_resolved_filter(harness: &Harness, filter: String) {
    assert_eq!(harness.loaded_config().log_filter(), filter);
}

#[then("loading the configuration resolves the hooks home to \"{path}\"")]
fn then_resolved_home(harness: &Harness, path: String) {
    assert_eq!(
        harness.loaded_config().hooks_home,
        Some(Utf8PathBuf::from(path))
    );
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.loaded_config();
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert!(config.hooks_home.is_none(), "expected no hooks home");
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply when nothing is configured"
)]
fn defaults_apply(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Environment overrides the configuration file"
)]
fn environment_overrides_file(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Command line overrides the environment"
)]
fn cli_overrides_environment(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Configuration file sets the hooks home"
)]
fn file_sets_hooks_home(#[from(harness)] harness: Harness) {
    drop(harness);
}
