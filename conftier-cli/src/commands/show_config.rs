//! Command to show configuration and where it comes from.

use crate::error::CliError;
use crate::utils::{open_manager, GlobalOptions};
use clap::{Args, ValueEnum};
use conftier::keypath;
use serde::Serialize;
use serde_yaml::Mapping;
use std::path::Path;

/// Output format for `show-config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Annotated YAML, one section per layer.
    Yaml,
    /// A single JSON document.
    Json,
}

/// Show the user file, the project file and the effective merge of both.
#[derive(Args)]
pub struct ShowConfigCommand {
    /// Configuration name
    pub name: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Print only the effective value at this dotted key path
    #[arg(long, short = 'k')]
    pub key: Option<String>,
}

#[derive(Serialize)]
struct Layer<'a> {
    path: Option<String>,
    config: Option<&'a Mapping>,
}

#[derive(Serialize)]
struct Report<'a> {
    name: &'a str,
    user: Layer<'a>,
    project: Layer<'a>,
    effective: &'a Mapping,
}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut manager = open_manager(&self.name, global)?;

        let user = manager.get_user_config()?.map(|model| model.to_dict());
        let project = manager.get_project_config()?.map(|model| model.to_dict());
        let user_path = manager.user_config_path().to_path_buf();
        let project_path = manager.project_config_path().map(Path::to_path_buf);
        let effective = manager.load()?.clone();

        if let Some(key) = &self.key {
            let value = keypath::lookup(&effective, key)?;
            match self.format {
                OutputFormat::Yaml => print!("{}", serde_yaml::to_string(value)?),
                OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
            }
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                let report = Report {
                    name: &self.name,
                    user: Layer {
                        path: Some(user_path.display().to_string()),
                        config: user.as_ref(),
                    },
                    project: Layer {
                        path: project_path.as_ref().map(|p| p.display().to_string()),
                        config: project.as_ref(),
                    },
                    effective: &effective,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Yaml => {
                if user.is_none() && project.is_none() {
                    println!("No configuration files found for '{}'", self.name);
                    return Ok(());
                }

                match &user {
                    Some(values) => {
                        println!("User config ({}):", user_path.display());
                        print!("{}", render(values)?);
                    }
                    None => println!("No user config found at {}", user_path.display()),
                }

                match (&project, &project_path) {
                    (Some(values), Some(path)) => {
                        println!("Project config ({}):", path.display());
                        print!("{}", render(values)?);
                    }
                    (_, Some(path)) => println!("No project config found at {}", path.display()),
                    (_, None) => println!("No project root found"),
                }

                println!("Effective config:");
                print!("{}", render(&effective)?);
            }
        }

        log::debug!("showed '{}' ({})", self.name, manager.state());
        Ok(())
    }
}

/// YAML for a mapping, with `{}` for an empty one.
fn render(values: &Mapping) -> Result<String, CliError> {
    if values.is_empty() {
        return Ok("{}\n".to_string());
    }
    Ok(serde_yaml::to_string(values)?)
}
