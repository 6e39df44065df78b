//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, InitProjectCommand, SetConfigCommand, ShowConfigCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and edit layered user and project configuration.
#[derive(Parser)]
#[command(name = "conftier")]
#[command(version, about = "Manage layered user and project configuration", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding the user config.yaml, instead of the platform config directory
    #[arg(long, value_name = "PATH", global = true, env = "CONFTIER_USER_DIR")]
    pub user_dir: Option<PathBuf>,

    /// Project root, instead of searching upward from the current directory
    #[arg(long, value_name = "PATH", global = true, env = "CONFTIER_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Create a project configuration template
    InitProject(InitProjectCommand),

    /// Show user, project and effective configuration
    ShowConfig(ShowConfigCommand),

    /// Set a configuration value in the user or project file
    SetConfig(SetConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
