//! Authentication command definitions.

use crate::commands::params::{
    document_format_parameter, format_pretty_parameter, COMMAND_AUTH, COMMAND_CLEAR_TOKEN,
    COMMAND_LOGIN, COMMAND_TEST, COMMAND_TOKEN,
};
use clap::Command;

/// Create the authentication command with all its subcommands.
pub fn auth_command() -> Command {
    Command::new(COMMAND_AUTH)
        .about("Authentication operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_TEST)
                .about("Test the connection, refreshing the stored token if the API rejects it"),
        )
        .subcommand(
            Command::new(COMMAND_LOGIN)
                .about("Fetch a new access token even if the stored one still works"),
        )
        .subcommand(
            Command::new(COMMAND_TOKEN)
                .about("Print the stored token response")
                .arg(document_format_parameter())
                .arg(format_pretty_parameter()),
        )
        .subcommand(Command::new(COMMAND_CLEAR_TOKEN).about("Delete the stored access token"))
}
