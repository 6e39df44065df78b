//! Library exports for conftier-cli.
//!
//! The binary and the integration tests share the command definitions
//! through this crate.

pub mod cli;
pub mod commands;
pub mod error;
pub mod utils;

pub use cli::Cli;
