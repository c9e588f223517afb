use clap::ArgMatches;
use tracing::warn;

use crate::{
    actions::print_formatted,
    client::EzyVetClient,
    commands::params::{PARAMETER_LOOKUP, PARAMETER_PRETTY},
    error::CliError,
    format::{OutputFormat, OutputFormatOptions},
    param_utils::GlobalOptions,
};

/// Print the name of a status id, or the id of a status name.
///
/// A lookup that matches nothing prints nothing.
pub async fn lookup_status(
    sub_matches: &ArgMatches,
    options: &GlobalOptions,
) -> Result<(), CliError> {
    let lookup = sub_matches
        .get_one::<String>(PARAMETER_LOOKUP)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_LOOKUP.to_string()))?;

    let configuration = options.load_configuration()?;
    let client = EzyVetClient::connect(&configuration, options.environment).await?;

    match client.lookup_appointment_status(lookup).await? {
        // bare strings print without quotes
        Some(serde_json::Value::String(name)) => println!("{}", name),
        Some(value) => {
            let format = OutputFormat::Json(OutputFormatOptions {
                with_headers: false,
                pretty: sub_matches.get_flag(PARAMETER_PRETTY),
            });
            print_formatted(&value, &format)?;
        }
        None => warn!("No appointment status matches {:?}", lookup),
    }
    Ok(())
}
