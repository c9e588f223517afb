//! Dispatch of parsed command lines to their actions.

use clap::ArgMatches;
use tracing::trace;

use crate::{
    actions::{appointment_status, auth, config, fetch, resources},
    commands::params::{
        COMMAND_APPOINTMENT_STATUS, COMMAND_AUTH, COMMAND_CLEAR_TOKEN, COMMAND_CONFIG,
        COMMAND_EXPORT, COMMAND_FETCH, COMMAND_IMPORT, COMMAND_LOGIN, COMMAND_LOOKUP,
        COMMAND_PATH, COMMAND_RESOURCES, COMMAND_SHOW, COMMAND_TEST, COMMAND_TOKEN,
    },
    error::CliError,
    param_utils::GlobalOptions,
};

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    match sub_matches.subcommand() {
        Some((name, _)) => name.to_string(),
        None => "unknown".to_string(),
    }
}

pub async fn execute_command(matches: &ArgMatches) -> Result<(), CliError> {
    let options = GlobalOptions::from_matches(matches);
    trace!("Global options: {:?}", options);

    match matches.subcommand() {
        Some((COMMAND_FETCH, sub_matches)) => match sub_matches.subcommand() {
            Some((resource, resource_matches)) => {
                fetch::fetch_resource(resource, resource_matches, &options).await
            }
            None => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                matches,
            ))),
        },
        Some((COMMAND_RESOURCES, sub_matches)) => resources::list_resources(sub_matches),
        Some((COMMAND_APPOINTMENT_STATUS, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_LOOKUP, sub_matches)) => {
                appointment_status::lookup_status(sub_matches, &options).await
            }
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        Some((COMMAND_AUTH, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_TEST, _)) => auth::test(&options).await,
            Some((COMMAND_LOGIN, _)) => auth::login(&options).await,
            Some((COMMAND_TOKEN, sub_matches)) => auth::token(sub_matches, &options),
            Some((COMMAND_CLEAR_TOKEN, _)) => auth::clear_token(&options),
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        Some((COMMAND_CONFIG, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_PATH, _)) => config::path(&options),
            Some((COMMAND_SHOW, sub_matches)) => config::show(sub_matches, &options),
            Some((COMMAND_EXPORT, sub_matches)) => config::export(sub_matches, &options),
            Some((COMMAND_IMPORT, sub_matches)) => config::import(sub_matches, &options),
            _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
                sub_matches,
            ))),
        },
        _ => Err(CliError::UnsupportedSubcommand(extract_subcommand_name(
            matches,
        ))),
    }
}
