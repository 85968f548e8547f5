//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/coursecat/coursecat.toml` (or `--config <path>`)
//! 3. Environment variables: `COURSECAT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::util::path::expand_path;

/// Default indentation of prerequisite lines in the course detail view.
pub const DEFAULT_PREREQUISITE_INDENT: usize = 2;

/// Unified configuration for coursecat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Catalog file used when the load prompt is answered with an empty line
    pub data_file: Option<PathBuf>,
    /// Spaces before each prerequisite in the course detail view
    pub prerequisite_indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: None,
            prerequisite_indent: DEFAULT_PREREQUISITE_INDENT,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, keep base).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub prerequisite_indent: Option<usize>,
}

/// Get the XDG config directory for coursecat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "coursecat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("coursecat.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~`, `$VAR` and `${VAR}` in path-like fields.
    fn expand_paths(&mut self) {
        self.data_file = self.data_file.as_deref().map(expand_path);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .or_else(|| self.data_file.clone()),
            prerequisite_indent: overlay
                .prerequisite_indent
                .unwrap_or(self.prerequisite_indent),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist. When `None`, the
    ///   global config is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_with_env(config_file, None)
    }

    /// Like [`Settings::load`], reading overrides from `env` instead of the
    /// process environment when given.
    pub fn load_with_env(
        config_file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|path| path.exists()),
        };
        if let Some(path) = file {
            debug!("loading config file {}", path.display());
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply COURSECAT_* environment variables as explicit overrides.
    ///
    /// `COURSECAT_PREREQUISITE_INDENT` maps to `prerequisite_indent`; nested keys
    /// would use `__` between segments.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COURSECAT")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = Some(PathBuf::from(val));
        }
        match config.get_int("prerequisite_indent") {
            Ok(val) => {
                settings.prerequisite_indent =
                    usize::try_from(val).map_err(|_| ApplicationError::Config {
                        message: format!("prerequisite_indent must not be negative: {val}"),
                    })?;
            }
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# coursecat configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/coursecat/coursecat.toml  (or --config <path>)
#   Env:  COURSECAT_* environment variables   (explicit overrides)

# Catalog file loaded when the file name prompt is left empty
# data_file = "~/courses.csv"

# Spaces before each prerequisite in the course detail view
# prerequisite_indent = 2
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
