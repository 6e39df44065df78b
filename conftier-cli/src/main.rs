//! Main entry point for the conftier CLI.
//!
//! Commands:
//! - `init-project`: Create a project configuration template
//! - `show-config`: Show user, project and effective configuration
//! - `set-config`: Set a value in the user or project file
//! - `completions`: Generate shell completion scripts

use clap::Parser;
use conftier_cli::cli::{Cli, Command};
use conftier_cli::utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = conftier::init_logger(cli.verbose, cli.quiet).install() {
        eprintln!("warning: {e}");
    }

    let global = GlobalOptions {
        quiet: cli.quiet,
        user_dir: cli.user_dir,
        project_dir: cli.project_dir,
    };

    let result = match cli.command {
        Command::InitProject(cmd) => cmd.execute(&global),
        Command::ShowConfig(cmd) => cmd.execute(&global),
        Command::SetConfig(cmd) => cmd.execute(&global),
        Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
