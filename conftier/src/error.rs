//! Error types for the conftier library.
//!
//! Every fallible operation in the crate returns [`Result`], whose error
//! side is the single [`Error`] enum defined here.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a conftier error.
///
/// # Examples
///
/// ```
/// use conftier::{Error, Result};
///
/// fn lookup() -> Result<u16> {
///     Err(Error::KeyNotFound { key: "server.port".into() })
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the conftier library.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration file exists but its content is not a valid YAML mapping.
    #[error("failed to parse {}: {message}", path.display())]
    ConfigParse {
        /// The file that failed to parse.
        path: PathBuf,
        /// What the parser reported.
        message: String,
    },

    /// A configuration does not satisfy its schema.
    #[error("schema validation failed for '{field}': {message}")]
    SchemaValidation {
        /// Dotted path of the offending field (`<root>` for the whole document).
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A directory or file could not be created.
    #[error("cannot create {}: {reason}", path.display())]
    PathPermission {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying reason.
        reason: String,
    },

    /// A dotted-path lookup did not resolve.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// The dotted path that was looked up.
        key: String,
    },

    /// A project-level operation was requested but no project root is known.
    #[error("no project root found for '{config_name}'")]
    ProjectRootNotFound {
        /// The configuration name the operation was for.
        config_name: String,
    },

    /// A path could not be resolved.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// YAML (de)serialization of an in-memory value failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::SchemaValidation`] error.
    ///
    /// Validation hooks use this to report the field they reject.
    ///
    /// # Examples
    ///
    /// ```
    /// use conftier::Error;
    ///
    /// let err = Error::validation("workers", "must be at least 1");
    /// assert_eq!(err.field(), Some("workers"));
    /// ```
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Check if error is a dotted-path miss.
    ///
    /// # Examples
    ///
    /// ```
    /// use conftier::Error;
    ///
    /// let err = Error::KeyNotFound { key: "a.b".into() };
    /// assert!(err.is_key_not_found());
    /// ```
    #[must_use]
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }

    /// Check if error is a schema validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::SchemaValidation { .. })
    }

    /// Returns the offending field path for validation errors.
    ///
    /// # Examples
    ///
    /// ```
    /// use conftier::Error;
    ///
    /// let err = Error::SchemaValidation {
    ///     field: "server.port".into(),
    ///     message: "expected integer".into(),
    /// };
    /// assert_eq!(err.field(), Some("server.port"));
    /// ```
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::SchemaValidation { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parse_error() {
        let err = Error::ConfigParse {
            path: PathBuf::from("/tmp/app/config.yaml"),
            message: "did not find expected key".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("failed to parse"));
        let normalized = display.replace(std::path::MAIN_SEPARATOR, "/");
        assert!(normalized.contains("/tmp/app/config.yaml"));
        assert!(display.contains("did not find expected key"));
    }

    #[test]
    fn test_schema_validation_error() {
        let err = Error::validation("server.port", "expected integer, found string");
        let display = format!("{err}");
        assert!(display.contains("schema validation failed"));
        assert!(display.contains("server.port"));
        assert!(err.is_validation());
        assert_eq!(err.field(), Some("server.port"));
    }

    #[test]
    fn test_path_permission_error() {
        let err = Error::PathPermission {
            path: PathBuf::from("/root/locked"),
            reason: "permission denied".to_string(),
        };
        let display = format!("{err}");
        assert!(display.contains("cannot create"));
        assert!(display.contains("permission denied"));
    }

    #[test]
    fn test_key_not_found_error() {
        let err = Error::KeyNotFound {
            key: "a.b.c".to_string(),
        };
        assert_eq!(format!("{err}"), "key not found: a.b.c");
        assert!(err.is_key_not_found());
        assert!(err.field().is_none());
    }

    #[test]
    fn test_project_root_not_found_error() {
        let err = Error::ProjectRootNotFound {
            config_name: "myapp".to_string(),
        };
        assert!(format!("{err}").contains("myapp"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(format!("{err}").contains("I/O error"));
    }
}
