//! The configuration manager.
//!
//! A [`ConfigManager`] owns everything needed to produce an application's
//! effective configuration: the schema, the resolved file locations and the
//! validation hooks. [`ConfigManager::load`] reads the user and project
//! files, merges them over the schema defaults and caches the result.

mod builder;
mod state;

pub use builder::{ConfigManagerBuilder, DEFAULT_VERSION};
pub use state::ConfigState;

use serde_yaml::Mapping;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::loader::ConfigLoader;
use crate::merger::ConfigMerger;
use crate::model::{ConfigModel, Strictness};
use crate::paths::{expand_tilde, project_config_path, ConfigPaths};
use crate::schema::Schema;
use crate::validator::{ConfigValidator, ValidationHook};

/// Loads, merges, caches and persists one application's configuration.
///
/// # Examples
///
/// ```
/// use conftier::{ConfigManager, MappingSchema};
///
/// let home = tempfile::tempdir().unwrap();
/// let project = tempfile::tempdir().unwrap();
/// let schema = MappingSchema::from_yaml("a:\n  b: 1\n  c: 2\n").unwrap();
///
/// let mut manager = ConfigManager::builder("demo", schema)
///     .user_config_dir(home.path())
///     .project_config_dir(project.path())
///     .build()
///     .unwrap();
///
/// let patch = serde_yaml::from_str("a:\n  b: 10\n").unwrap();
/// manager.update_user_config(&patch).unwrap();
///
/// let config = manager.load().unwrap();
/// assert_eq!(serde_yaml::to_string(config).unwrap(), "a:\n  b: 10\n  c: 2\n");
/// ```
pub struct ConfigManager<S: Schema> {
    name: String,
    version: String,
    schema: Arc<S>,
    strictness: Strictness,
    paths: ConfigPaths,
    auto_create_user: bool,
    auto_create_project: bool,
    hooks: Vec<ValidationHook>,
    cache: Option<ConfigModel<S>>,
    state: ConfigState,
}

impl<S: Schema> ConfigManager<S> {
    /// Start building a manager for the configuration `name`.
    pub fn builder(name: impl Into<String>, schema: S) -> ConfigManagerBuilder<S> {
        ConfigManagerBuilder::new(name, Arc::new(schema))
    }

    /// Start building a manager around a schema that is already shared.
    pub fn builder_shared(name: impl Into<String>, schema: Arc<S>) -> ConfigManagerBuilder<S> {
        ConfigManagerBuilder::new(name, schema)
    }

    /// Read every layer, merge, validate and cache the result.
    ///
    /// Missing files are skipped. With auto-create enabled, missing
    /// templates are written first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] for a malformed file,
    /// [`Error::SchemaValidation`] if a layer or the merged result fails
    /// validation (including validation hooks), and I/O errors from
    /// template creation.
    pub fn load(&mut self) -> Result<&S::Config> {
        Ok(self.load_model()?.model())
    }

    /// Like [`ConfigManager::load`], returning the merged model.
    ///
    /// # Errors
    ///
    /// See [`ConfigManager::load`].
    pub fn load_model(&mut self) -> Result<&ConfigModel<S>> {
        self.cache = None;

        if self.auto_create_user {
            self.create_user_config_template()?;
        }
        if self.auto_create_project {
            if self.paths.project_config.is_some() {
                self.create_project_config_template(None)?;
            } else {
                log::warn!(
                    "no project root for '{}'; skipping project template",
                    self.name
                );
            }
        }

        let default = self.get_default_config()?;
        let user = self.get_user_config()?;
        let project = self.get_project_config()?;
        self.state = ConfigState::from_presence(user.is_some(), project.is_some());
        log::debug!("loading '{}': {}", self.name, self.state);

        let merged = ConfigMerger::merge_configs(&default, user.as_ref(), project.as_ref())?;
        ConfigValidator::run_hooks(&self.hooks, merged.values())?;

        Ok(&*self.cache.insert(merged))
    }

    /// The effective configuration, loading it on first access.
    ///
    /// # Errors
    ///
    /// See [`ConfigManager::load`].
    pub fn config(&mut self) -> Result<&S::Config> {
        Ok(self.config_model()?.model())
    }

    /// The effective configuration model, loading it on first access.
    ///
    /// # Errors
    ///
    /// See [`ConfigManager::load`].
    pub fn config_model(&mut self) -> Result<&ConfigModel<S>> {
        match self.cache.take() {
            Some(model) => Ok(&*self.cache.insert(model)),
            None => self.load_model(),
        }
    }

    /// A model holding only the schema defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema defaults do not satisfy the schema.
    pub fn get_default_config(&self) -> Result<ConfigModel<S>> {
        ConfigModel::from_schema_with(Arc::clone(&self.schema), None, self.strictness)
    }

    /// The user layer, or `None` if the user file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the file is malformed and
    /// [`Error::SchemaValidation`] if its content fails the schema.
    pub fn get_user_config(&self) -> Result<Option<ConfigModel<S>>> {
        self.read_layer(&self.paths.user_config)
    }

    /// The project layer, or `None` if there is no project root or the
    /// project file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the file is malformed and
    /// [`Error::SchemaValidation`] if its content fails the schema.
    pub fn get_project_config(&self) -> Result<Option<ConfigModel<S>>> {
        match &self.paths.project_config {
            Some(path) => self.read_layer(path),
            None => Ok(None),
        }
    }

    fn read_layer(&self, path: &Path) -> Result<Option<ConfigModel<S>>> {
        let Some(values) = ConfigLoader::read_mapping(path)? else {
            return Ok(None);
        };
        ConfigModel::from_schema_with(Arc::clone(&self.schema), Some(&values), self.strictness)
            .map(Some)
            .map_err(|e| in_file(e, path))
    }

    /// Deep-merge `patch` into the user file and write it back.
    ///
    /// The file keeps only the keys it already set plus those in `patch`,
    /// so a default never ends up written as an explicit override.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] if the result fails the schema,
    /// in which case the file is not touched, and I/O errors from writing.
    pub fn update_user_config(&mut self, patch: &Mapping) -> Result<()> {
        let path = self.paths.user_config.clone();
        self.update_file(&path, patch)
    }

    /// Deep-merge `patch` into the project file and write it back.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProjectRootNotFound`] if there is no project root,
    /// otherwise as [`ConfigManager::update_user_config`].
    pub fn update_project_config(&mut self, patch: &Mapping) -> Result<()> {
        let path = self.require_project_path()?;
        self.update_file(&path, patch)
    }

    fn update_file(&mut self, path: &Path, patch: &Mapping) -> Result<()> {
        let existing = ConfigLoader::read_mapping(path)?.unwrap_or_default();
        let mut model =
            ConfigModel::from_schema_with(Arc::clone(&self.schema), Some(&existing), self.strictness)
                .map_err(|e| in_file(e, path))?;
        model.update(patch)?;

        // Only the file's own keys; defaults stay implicit
        ConfigLoader::write_mapping(path, model.overrides())?;
        self.cache = None;
        Ok(())
    }

    /// Serialize `config` and apply it to the user file.
    ///
    /// # Errors
    ///
    /// As [`ConfigManager::update_user_config`].
    pub fn save_user_config(&mut self, config: &S::Config) -> Result<()> {
        let values = self.schema.serialize(config)?;
        self.update_user_config(&values)
    }

    /// Serialize `config` and apply it to the project file.
    ///
    /// # Errors
    ///
    /// As [`ConfigManager::update_project_config`].
    pub fn save_project_config(&mut self, config: &S::Config) -> Result<()> {
        let values = self.schema.serialize(config)?;
        self.update_project_config(&values)
    }

    /// Write the schema defaults to the user file if it does not exist.
    ///
    /// Returns `true` if a file was written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathPermission`] if the directory cannot be created.
    pub fn create_user_config_template(&self) -> Result<bool> {
        self.write_template(&self.paths.user_config)
    }

    /// Write the schema defaults to the project file if it does not exist.
    ///
    /// `project_dir` overrides the manager's project root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProjectRootNotFound`] if no project root is known
    /// and none is given, and [`Error::PathPermission`] if the directory
    /// cannot be created.
    pub fn create_project_config_template(&self, project_dir: Option<&Path>) -> Result<bool> {
        let path = match project_dir {
            Some(dir) => project_config_path(&self.name, &expand_tilde(dir)?),
            None => self.require_project_path()?,
        };
        self.write_template(&path)
    }

    fn write_template(&self, path: &Path) -> Result<bool> {
        if path.exists() {
            log::debug!("template not written, {} exists", path.display());
            return Ok(false);
        }
        ConfigLoader::write_mapping(path, &self.schema.defaults()?)?;
        log::info!("created configuration template {}", path.display());
        Ok(true)
    }

    fn require_project_path(&self) -> Result<PathBuf> {
        self.paths
            .project_config
            .clone()
            .ok_or_else(|| Error::ProjectRootNotFound {
                config_name: self.name.clone(),
            })
    }

    /// Which files were present at the last load.
    #[must_use]
    pub fn state(&self) -> ConfigState {
        self.state
    }

    /// Which files are present now, without loading them.
    #[must_use]
    pub fn detect_state(&self) -> ConfigState {
        let project = self
            .paths
            .project_config
            .as_deref()
            .is_some_and(Path::exists);
        ConfigState::from_presence(self.paths.user_config.exists(), project)
    }

    /// The configuration name.
    #[must_use]
    pub fn config_name(&self) -> &str {
        &self.name
    }

    /// The configuration version string.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// The schema shared by every model this manager produces.
    #[must_use]
    pub fn schema(&self) -> &Arc<S> {
        &self.schema
    }

    /// Whether unknown keys are rejected.
    #[must_use]
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// The user file location.
    #[must_use]
    pub fn user_config_path(&self) -> &Path {
        &self.paths.user_config
    }

    /// The project file location, if there is a project root.
    #[must_use]
    pub fn project_config_path(&self) -> Option<&Path> {
        self.paths.project_config.as_deref()
    }

    /// The project root, if one was given or discovered.
    #[must_use]
    pub fn project_root(&self) -> Option<&Path> {
        self.paths.project_root.as_deref()
    }
}

impl<S: Schema> fmt::Debug for ConfigManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigManager")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("strictness", &self.strictness)
            .field("paths", &self.paths)
            .field("state", &self.state)
            .field("cached", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

/// Attach the file a validation error came from.
fn in_file(err: Error, path: &Path) -> Error {
    match err {
        Error::SchemaValidation { field, message } => Error::SchemaValidation {
            field,
            message: format!("{message} (in {})", path.display()),
        },
        other => other,
    }
}
