//! Build script for conftier-cli.
//!
//! Generates the man page at build time using clap_mangen and places it in
//! OUT_DIR.
//!
//! The command structure is rebuilt here rather than imported, since a build
//! script cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("conftier")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage layered user and project configuration")
        .long_about(
            "Inspect and edit configuration merged from schema defaults, a user file and a project file",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("user-dir")
                .long("user-dir")
                .help("Directory holding the user config.yaml")
                .value_name("PATH")
                .global(true)
                .env("CONFTIER_USER_DIR"),
        )
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .help("Project root, instead of searching upward from the current directory")
                .value_name("PATH")
                .global(true)
                .env("CONFTIER_PROJECT_DIR"),
        )
        .subcommands(vec![
            Command::new("init-project")
                .about("Create a project configuration template")
                .long_about("Create .<name>/config.yaml in the project directory if it is missing"),
            Command::new("show-config")
                .about("Show user, project and effective configuration")
                .long_about("Print each configuration layer and the result of merging them"),
            Command::new("set-config")
                .about("Set a configuration value")
                .long_about("Set a value at a dotted key path in the user or project file"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("conftier.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
