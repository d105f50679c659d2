//! CLI module for the game catalog
//!
//! Provides command-line interface for:
//! - serve: Resolve configuration, open the store and run the HTTP server
//! - check-config: Print the resolved configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, load_fixture, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliResult};
