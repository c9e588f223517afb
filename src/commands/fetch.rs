//! Fetch command definitions.
//!
//! One subcommand per row of the resource table.

use crate::commands::params::{
    all_parameter, filter_parameter, format_parameter, format_pretty_parameter,
    format_with_headers_parameter, max_parameter, COMMAND_FETCH, COMMAND_RESOURCES,
};
use crate::resources::Resource;
use clap::Command;

fn resource_command(resource: Resource) -> Command {
    let command = Command::new(resource.name())
        .about(resource.about())
        .arg(max_parameter())
        .arg(all_parameter())
        .arg(format_parameter())
        .arg(format_pretty_parameter())
        .arg(format_with_headers_parameter());

    if resource.accepts_filter() {
        command.arg(filter_parameter())
    } else {
        command
    }
}

/// Create the fetch command with a subcommand for every resource.
pub fn fetch_command() -> Command {
    Command::new(COMMAND_FETCH)
        .about("Fetch records from a list endpoint")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(Resource::all().map(resource_command))
}

/// Create the resources command listing the endpoint table.
pub fn resources_command() -> Command {
    Command::new(COMMAND_RESOURCES)
        .about("List the resources that can be fetched")
        .visible_alias("ls")
        .arg(format_parameter())
        .arg(format_pretty_parameter())
        .arg(format_with_headers_parameter())
}
