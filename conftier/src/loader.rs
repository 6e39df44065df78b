//! Configuration file reading and writing.
//!
//! Files are YAML documents whose top level is a mapping. A file that does
//! not exist is not an error; a file that exists but does not parse is.
//! Writes go through a temporary file in the target directory that is then
//! renamed over the destination, so a reader never sees a partial file.

use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::schema::value_kind;

/// Reads and writes configuration files.
///
/// # Examples
///
/// ```
/// use conftier::ConfigLoader;
/// use serde_yaml::Mapping;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("nested/config.yaml");
///
/// assert!(ConfigLoader::read_mapping(&path).unwrap().is_none());
///
/// let values: Mapping = serde_yaml::from_str("name: demo\n").unwrap();
/// ConfigLoader::write_mapping(&path, &values).unwrap();
/// assert_eq!(ConfigLoader::read_mapping(&path).unwrap(), Some(values));
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read a configuration file as a mapping.
    ///
    /// Returns `Ok(None)` if the file does not exist. An empty file, or one
    /// holding only comments, reads as an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the content is not YAML or its top
    /// level is not a mapping, and [`Error::Io`] if the file exists but
    /// cannot be read.
    pub fn read_mapping(path: &Path) -> Result<Option<Mapping>> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no configuration file at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(Error::Io(e)),
        };

        log::debug!("reading configuration from {}", path.display());
        Self::parse_mapping(&contents, path).map(Some)
    }

    /// Parse YAML text as a configuration mapping.
    ///
    /// `path` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if the text is not YAML or its top
    /// level is not a mapping.
    pub fn parse_mapping(contents: &str, path: &Path) -> Result<Mapping> {
        let value: Value = serde_yaml::from_str(contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        match value {
            Value::Mapping(mapping) => Ok(mapping),
            Value::Null => Ok(Mapping::new()),
            other => Err(Error::ConfigParse {
                path: path.to_path_buf(),
                message: format!("top level must be a mapping, found {}", value_kind(&other)),
            }),
        }
    }

    /// Write a mapping as YAML, replacing the file atomically.
    ///
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathPermission`] if the directory or temporary file
    /// cannot be created, and [`Error::Io`] if writing or renaming fails.
    pub fn write_mapping(path: &Path, values: &Mapping) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(dir)?;

        let contents = serde_yaml::to_string(values)?;

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::PathPermission {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        log::debug!("wrote configuration to {}", path.display());
        Ok(())
    }

    /// Create a directory and its parents if missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathPermission`] if the directory cannot be created.
    pub fn ensure_dir(dir: &Path) -> Result<()> {
        if dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(dir).map_err(|e| Error::PathPermission {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::debug!("created directory {}", dir.display());
        Ok(())
    }
}
