//! Common test utilities for CLI integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated user and project directories for one test.
pub struct TestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Directory passed as `--user-dir`.
    pub user_dir: PathBuf,
    /// Directory passed as `--project-dir`.
    pub project_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let user_dir = temp_dir.path().join("user");
        let project_dir = temp_dir.path().join("project");
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        Self {
            temp_dir,
            user_dir,
            project_dir,
        }
    }

    /// The binary, run from the temp directory with no inherited overrides.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("conftier").expect("Failed to find conftier binary");
        cmd.current_dir(self.temp_dir.path())
            .env_remove("CONFTIER_USER_DIR")
            .env_remove("CONFTIER_PROJECT_DIR")
            .env_remove("CONFTIER_LOG_MODE");
        cmd
    }

    /// The binary with `--user-dir` and `--project-dir` pointing here.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--user-dir")
            .arg(&self.user_dir)
            .arg("--project-dir")
            .arg(&self.project_dir);
        cmd
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn user_file(&self) -> PathBuf {
        self.user_dir.join("config.yaml")
    }

    pub fn project_file(&self, name: &str) -> PathBuf {
        self.project_dir.join(format!(".{name}")).join("config.yaml")
    }

    pub fn write_user(&self, contents: &str) {
        fs::create_dir_all(&self.user_dir).unwrap();
        fs::write(self.user_file(), contents).unwrap();
    }

    pub fn write_project(&self, name: &str, contents: &str) {
        let path = self.project_file(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    /// Parse a written file back as YAML.
    pub fn read_yaml(path: &Path) -> serde_yaml::Value {
        serde_yaml::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }
}
