//! Configuration command definitions.

use crate::commands::params::{
    document_format_parameter, file_parameter, format_pretty_parameter, output_file_parameter,
    COMMAND_CONFIG, COMMAND_EXPORT, COMMAND_IMPORT, COMMAND_PATH, COMMAND_SHOW,
};
use clap::Command;

/// Create the config command with all its subcommands.
pub fn config_command() -> Command {
    Command::new(COMMAND_CONFIG)
        .about("Configuration management")
        .subcommand_required(true)
        .subcommand(Command::new(COMMAND_PATH).about("Show configuration file path"))
        .subcommand(
            Command::new(COMMAND_SHOW)
                .about("Show the configuration with client secrets hidden")
                .arg(document_format_parameter())
                .arg(format_pretty_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_EXPORT)
                .about("Export configuration to file")
                .arg(output_file_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_IMPORT)
                .about("Import configuration from file")
                .arg(file_parameter()),
        )
}
