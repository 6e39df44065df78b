#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # conftier
//!
//! A layered configuration loader.
//!
//! Three sources are merged into one validated configuration object, with
//! later sources winning key by key:
//!
//! 1. defaults declared by a schema
//! 2. a user-global file, `{config_dir}/{name}/config.yaml`
//! 3. a project-local file, `{project_root}/.{name}/config.yaml`
//!
//! ## Core Types
//!
//! - [`Schema`] and its adapters [`TypedSchema`], [`RecordSchema`] and
//!   [`MappingSchema`]: how fields, defaults and types are described
//! - [`ConfigModel`]: one configuration instance, independent of its schema
//!   representation
//! - [`ConfigMerger`]: deep merge by precedence
//! - [`ConfigManager`]: loading, caching, templates and persistence
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: a stderr backend for the `log` facade
//!
//! ## Examples
//!
//! ```
//! use conftier::{ConfigManager, TypedSchema};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(default)]
//! struct AppConfig {
//!     model_name: Option<String>,
//!     temperature: f64,
//! }
//!
//! let user_dir = tempfile::tempdir().unwrap();
//! let project_dir = tempfile::tempdir().unwrap();
//!
//! let mut manager = ConfigManager::builder("myapp", TypedSchema::<AppConfig>::new())
//!     .user_config_dir(user_dir.path())
//!     .project_config_dir(project_dir.path())
//!     .build()
//!     .unwrap();
//!
//! let patch = serde_yaml::from_str("model_name: small\n").unwrap();
//! manager.update_project_config(&patch).unwrap();
//!
//! let config = manager.load().unwrap();
//! assert_eq!(config.model_name.as_deref(), Some("small"));
//! ```

pub mod error;
pub mod keypath;
pub mod loader;
pub mod logging;
pub mod manager;
pub mod merger;
pub mod model;
pub mod paths;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use error::{Error, Result};
pub use loader::ConfigLoader;
pub use logging::{init_logger, LogLevel, Logger};
pub use manager::{ConfigManager, ConfigManagerBuilder, ConfigState};
pub use merger::ConfigMerger;
pub use model::{ConfigModel, Strictness};
pub use paths::ConfigPaths;
pub use schema::{Field, FieldKind, MappingSchema, RecordSchema, Schema, SchemaKind, TypedSchema};
pub use validator::{ConfigValidator, ValidationHook};
