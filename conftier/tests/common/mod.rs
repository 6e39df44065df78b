//! Common test utilities for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use conftier::{ConfigManager, ConfigManagerBuilder, Schema};
use tempfile::TempDir;

/// Configuration name used by every fixture.
pub const APP: &str = "app";

/// A throwaway user directory and project root.
pub struct Workspace {
    pub user: TempDir,
    pub project: TempDir,
}

#[allow(dead_code)]
impl Workspace {
    pub fn new() -> Self {
        Self {
            user: tempfile::tempdir().unwrap(),
            project: tempfile::tempdir().unwrap(),
        }
    }

    /// A builder pointed at this workspace's directories.
    pub fn builder<S: Schema>(&self, schema: S) -> ConfigManagerBuilder<S> {
        ConfigManager::builder(APP, schema)
            .user_config_dir(self.user.path())
            .project_config_dir(self.project.path())
    }

    pub fn user_file(&self) -> PathBuf {
        self.user.path().join("config.yaml")
    }

    pub fn project_file(&self) -> PathBuf {
        self.project.path().join(format!(".{APP}")).join("config.yaml")
    }

    pub fn write_user(&self, contents: &str) {
        write(&self.user_file(), contents);
    }

    pub fn write_project(&self, contents: &str) {
        write(&self.project_file(), contents);
    }
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Parse a YAML mapping literal.
#[allow(dead_code)]
pub fn yaml(text: &str) -> serde_yaml::Mapping {
    serde_yaml::from_str(text).unwrap()
}
