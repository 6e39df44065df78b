//! CLI command implementations.
//!
//! - `init_project`: Create a project configuration template
//! - `show_config`: Show user, project and effective configuration
//! - `set_config`: Set a value in the user or project file
//! - `completions`: Generate shell completion scripts

pub mod completions;
pub mod init_project;
pub mod set_config;
pub mod show_config;

pub use completions::CompletionsCommand;
pub use init_project::InitProjectCommand;
pub use set_config::SetConfigCommand;
pub use show_config::ShowConfigCommand;
