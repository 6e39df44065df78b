//! Configuration file locations.
//!
//! - user file: `{config_dir}/{name}/config.yaml`, where `config_dir` is the
//!   platform configuration directory unless overridden
//! - project file: `{project_root}/.{name}/config.yaml`, where the project
//!   root is the nearest ancestor holding one of [`PROJECT_MARKERS`]

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of every configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Entries whose presence marks a directory as a project root.
pub const PROJECT_MARKERS: &[&str] = &[
    ".git",
    "pyproject.toml",
    "setup.py",
    "package.json",
    "Cargo.toml",
];

/// Expand tilde (~) to the home directory.
///
/// Handles `~` and `~/path`; `~user` is rejected.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the path is not UTF-8, the home
/// directory cannot be determined, or the path uses `~user` syntax.
///
/// # Examples
///
/// ```
/// use conftier::paths::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/work")).unwrap();
/// assert!(expanded.ends_with("work"));
///
/// let unchanged = expand_tilde(Path::new("/etc/app")).unwrap();
/// assert_eq!(unchanged, Path::new("/etc/app"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "path contains invalid UTF-8".to_string(),
    })?;

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "cannot determine home directory".to_string(),
    })?;

    if path_str == "~" {
        Ok(home)
    } else if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        Ok(home.join(&path_str[2..]))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Check that a configuration name can be used as a directory name.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the name is empty, is `.` or `..`, or
/// contains a path separator.
pub fn validate_config_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "configuration name must not be empty"
    } else if name == "." || name == ".." {
        "configuration name must not be '.' or '..'"
    } else if name.contains('/') || name.contains('\\') {
        "configuration name must not contain path separators"
    } else {
        return Ok(());
    };

    Err(Error::InvalidPath {
        path: PathBuf::from(name),
        reason: reason.to_string(),
    })
}

/// Find the nearest ancestor of `start` (inclusive) holding a project marker.
///
/// The filesystem root itself is never reported as a project root.
///
/// # Examples
///
/// ```
/// use conftier::paths::find_project_root;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir(dir.path().join(".git")).unwrap();
/// let nested = dir.path().join("src/bin");
/// std::fs::create_dir_all(&nested).unwrap();
///
/// assert_eq!(find_project_root(&nested).as_deref(), Some(dir.path()));
/// ```
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .filter(|dir| dir.parent().is_some())
        .find(|dir| PROJECT_MARKERS.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// The user configuration file for `name`.
///
/// With `user_config_dir` set the file is `{user_config_dir}/config.yaml`;
/// otherwise it lives under the platform configuration directory.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if the override cannot be expanded or the
/// platform has no configuration directory.
pub fn user_config_path(name: &str, user_config_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = user_config_dir {
        return Ok(expand_tilde(dir)?.join(CONFIG_FILE_NAME));
    }

    let base = dirs::config_dir().ok_or_else(|| Error::InvalidPath {
        path: PathBuf::from(name),
        reason: "cannot determine the user configuration directory".to_string(),
    })?;
    Ok(base.join(name).join(CONFIG_FILE_NAME))
}

/// The project configuration file for `name` under `project_root`.
#[must_use]
pub fn project_config_path(name: &str, project_root: &Path) -> PathBuf {
    project_root.join(format!(".{name}")).join(CONFIG_FILE_NAME)
}

/// Every location a manager reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// The user configuration file.
    pub user_config: PathBuf,
    /// The project root, if one was given or discovered.
    pub project_root: Option<PathBuf>,
    /// The project configuration file, if there is a project root.
    pub project_config: Option<PathBuf>,
}

impl ConfigPaths {
    /// Resolve all locations for `name`.
    ///
    /// `project_dir` overrides discovery; otherwise the project root is
    /// searched for upward from `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the name is unusable or a path
    /// cannot be resolved.
    pub fn resolve(
        name: &str,
        user_config_dir: Option<&Path>,
        project_dir: Option<&Path>,
        working_dir: &Path,
    ) -> Result<Self> {
        validate_config_name(name)?;

        let user_config = user_config_path(name, user_config_dir)?;
        let project_root = match project_dir {
            Some(dir) => Some(expand_tilde(dir)?),
            None => find_project_root(working_dir),
        };
        let project_config = project_root
            .as_deref()
            .map(|root| project_config_path(name, root));

        log::debug!("user config path: {}", user_config.display());
        match &project_config {
            Some(path) => log::debug!("project config path: {}", path.display()),
            None => log::debug!("no project root found from {}", working_dir.display()),
        }

        Ok(Self {
            user_config,
            project_root,
            project_config,
        })
    }
}
