//! Appointment status command definitions.

use crate::commands::params::{
    format_pretty_parameter, lookup_parameter, COMMAND_APPOINTMENT_STATUS, COMMAND_LOOKUP,
};
use clap::Command;

pub fn appointment_status_command() -> Command {
    Command::new(COMMAND_APPOINTMENT_STATUS)
        .about("Appointment status codes")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_LOOKUP)
                .about("Look up an appointment status by id or name")
                .arg(lookup_parameter())
                .arg(format_pretty_parameter()),
        )
}
