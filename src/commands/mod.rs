//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.
//! The fetch subcommands are generated from the resource table, so adding a
//! resource there is enough to make it available on the command line.

use clap::{ArgMatches, Command};

pub mod appointment_status;
pub mod auth;
pub mod config;
pub mod fetch;
pub mod params;

/// Build the complete command tree without parsing anything.
pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(params::verbose_parameter())
        .arg(params::debug_parameter())
        .arg(params::sandbox_parameter())
        .arg(params::config_file_parameter())
        .subcommand(fetch::fetch_command())
        .subcommand(fetch::resources_command())
        .subcommand(appointment_status::appointment_status_command())
        .subcommand(auth::auth_command())
        .subcommand(config::config_command())
}

/// Parse the process arguments against the command tree.
pub fn create_cli_commands() -> ArgMatches {
    build_cli().get_matches()
}
