//! Command to set one configuration value.

use crate::error::CliError;
use crate::utils::{open_manager, parse_scalar, GlobalOptions};
use clap::Args;
use conftier::keypath;

/// Set a value at a dotted key path in the user or project file.
///
/// Intermediate mappings are created as needed; a scalar in the way is
/// replaced by a mapping.
#[derive(Args)]
pub struct SetConfigCommand {
    /// Configuration name
    pub name: String,

    /// Dotted key path, e.g. `llm.model_name`
    #[arg(long, short = 'k')]
    pub key: String,

    /// Value, parsed as a YAML scalar (true, 42, 1.5, null, otherwise a string)
    #[arg(long, short = 'v', allow_hyphen_values = true)]
    pub value: String,

    /// Update the project config instead of the user config
    #[arg(long, short = 'p')]
    pub project: bool,
}

impl SetConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if keypath::segments(&self.key).is_none() {
            return Err(CliError::InvalidArguments(format!(
                "'{}' is not a dotted key path",
                self.key
            )));
        }
        let patch = keypath::nest(&self.key, parse_scalar(&self.value))?;

        let mut manager = open_manager(&self.name, global)?;
        let scope = if self.project {
            manager.update_project_config(&patch)?;
            "project"
        } else {
            manager.update_user_config(&patch)?;
            "user"
        };

        global.status(&format!("Updated {scope} config: {} = {}", self.key, self.value));
        Ok(())
    }
}
