//! Command to create a project configuration template.

use crate::error::CliError;
use crate::utils::{open_manager, GlobalOptions};
use clap::Args;
use conftier::paths::{expand_tilde, project_config_path};
use std::env;
use std::path::PathBuf;

/// Create `.{name}/config.yaml` in a project directory.
#[derive(Args)]
pub struct InitProjectCommand {
    /// Configuration name
    pub name: String,

    /// Project directory (default: --project-dir, then the current directory)
    #[arg(long, short = 'p', value_name = "DIR")]
    pub path: Option<PathBuf>,
}

impl InitProjectCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let dir = match self.path.or_else(|| global.project_dir.clone()) {
            Some(dir) => dir,
            None => env::current_dir()?,
        };
        let dir = expand_tilde(&dir)?;

        let manager = open_manager(&self.name, global)?;
        let target = project_config_path(&self.name, &dir);

        if manager.create_project_config_template(Some(&dir))? {
            global.status(&format!(
                "Created project config template: {}",
                target.display()
            ));
        } else {
            global.status(&format!(
                "Project config already exists: {}",
                target.display()
            ));
        }
        Ok(())
    }
}
