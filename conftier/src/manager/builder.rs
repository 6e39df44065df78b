use serde_yaml::Mapping;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::{ConfigManager, ConfigState};
use crate::error::Result;
use crate::model::Strictness;
use crate::paths::ConfigPaths;
use crate::schema::Schema;
use crate::validator::ValidationHook;

/// Version string used when none is given.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Builder for [`ConfigManager`].
///
/// Created with [`ConfigManager::builder`].
pub struct ConfigManagerBuilder<S: Schema> {
    name: String,
    schema: Arc<S>,
    version: String,
    auto_create_user: bool,
    auto_create_project: bool,
    strict: bool,
    user_config_dir: Option<PathBuf>,
    project_config_dir: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    hooks: Vec<ValidationHook>,
}

impl<S: Schema> ConfigManagerBuilder<S> {
    pub(super) fn new(name: impl Into<String>, schema: Arc<S>) -> Self {
        Self {
            name: name.into(),
            schema,
            version: DEFAULT_VERSION.to_string(),
            auto_create_user: false,
            auto_create_project: false,
            strict: false,
            user_config_dir: None,
            project_config_dir: None,
            working_dir: None,
            hooks: Vec::new(),
        }
    }

    /// Sets the configuration version string.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Create both the user and the project template when missing.
    #[must_use]
    pub const fn auto_create(mut self, enabled: bool) -> Self {
        self.auto_create_user = enabled;
        self.auto_create_project = enabled;
        self
    }

    /// Create the user template when missing.
    #[must_use]
    pub const fn auto_create_user(mut self, enabled: bool) -> Self {
        self.auto_create_user = enabled;
        self
    }

    /// Create the project template when missing and a project root is known.
    #[must_use]
    pub const fn auto_create_project(mut self, enabled: bool) -> Self {
        self.auto_create_project = enabled;
        self
    }

    /// Reject keys the schema does not declare.
    #[must_use]
    pub const fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Read the user file from `{dir}/config.yaml` instead of the platform
    /// configuration directory.
    #[must_use]
    pub fn user_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_config_dir = Some(dir.into());
        self
    }

    /// Use `dir` as the project root instead of searching for one.
    #[must_use]
    pub fn project_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_config_dir = Some(dir.into());
        self
    }

    /// Search for the project root from `dir` instead of the current
    /// directory.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add a hook run against the merged configuration on every load.
    #[must_use]
    pub fn validation_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Mapping) -> Result<()> + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Resolve paths and build the manager.
    ///
    /// With `auto_create_user` set, the user template is written now if
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or a path cannot be resolved, or if
    /// the user template cannot be created.
    pub fn build(self) -> Result<ConfigManager<S>> {
        let working_dir = match self.working_dir {
            Some(dir) => dir,
            None => env::current_dir()?,
        };
        let paths = ConfigPaths::resolve(
            &self.name,
            self.user_config_dir.as_deref(),
            self.project_config_dir.as_deref(),
            &working_dir,
        )?;

        let manager = ConfigManager {
            name: self.name,
            version: self.version,
            schema: self.schema,
            strictness: Strictness::from_flag(self.strict),
            paths,
            auto_create_user: self.auto_create_user,
            auto_create_project: self.auto_create_project,
            hooks: self.hooks,
            cache: None,
            state: ConfigState::Uninitialized,
        };

        if manager.auto_create_user {
            manager.create_user_config_template()?;
        }

        Ok(manager)
    }
}

impl<S: Schema> fmt::Debug for ConfigManagerBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManagerBuilder")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("strict", &self.strict)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}
