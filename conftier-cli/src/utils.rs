//! Utility functions for CLI operations.
//!
//! The CLI has no compiled-in schema, so every command works against an
//! open [`MappingSchema`]: whatever the files contain is accepted and
//! merged.

use crate::error::CliError;
use conftier::{ConfigManager, MappingSchema};
use serde_yaml::Value;
use std::path::PathBuf;

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Directory holding the user `config.yaml`.
    pub user_dir: Option<PathBuf>,

    /// Project root override.
    pub project_dir: Option<PathBuf>,
}

impl GlobalOptions {
    /// Print a status line to stdout unless `--quiet` was given.
    pub fn status(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// Build a manager for `name` honouring the global path overrides.
pub fn open_manager(
    name: &str,
    global: &GlobalOptions,
) -> Result<ConfigManager<MappingSchema>, CliError> {
    let mut builder = ConfigManager::builder(name, MappingSchema::empty());
    if let Some(dir) = &global.user_dir {
        builder = builder.user_config_dir(dir);
    }
    if let Some(dir) = &global.project_dir {
        builder = builder.project_config_dir(dir);
    }
    builder.build().map_err(CliError::from)
}

/// Interpret a command-line value as a YAML scalar.
///
/// `true`, `42`, `1.5` and `null` become the corresponding YAML values;
/// anything else, including text that would parse as a YAML collection, is
/// kept as a string.
pub fn parse_scalar(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::String(raw.to_string());
    }
    match serde_yaml::from_str::<Value>(raw) {
        Ok(value @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}
