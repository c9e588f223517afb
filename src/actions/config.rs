use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{debug, info};

use crate::{
    actions::print_formatted,
    commands::params::{PARAMETER_FILE, PARAMETER_OUTPUT},
    configuration::Configuration,
    error::CliError,
    param_utils::{get_format_parameter_value, GlobalOptions},
};

pub fn path(options: &GlobalOptions) -> Result<(), CliError> {
    println!("{}", options.configuration_path()?.display());
    Ok(())
}

/// Print the configuration with client secrets hidden
pub fn show(sub_matches: &ArgMatches, options: &GlobalOptions) -> Result<(), CliError> {
    let configuration = options.load_configuration()?;
    let format = get_format_parameter_value(sub_matches)?;
    print_formatted(&configuration.redacted(), &format)
}

pub fn export(sub_matches: &ArgMatches, options: &GlobalOptions) -> Result<(), CliError> {
    let output = sub_matches
        .get_one::<PathBuf>(PARAMETER_OUTPUT)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_OUTPUT.to_string()))?;

    let configuration = options.load_configuration()?;
    configuration.save(output)?;
    info!("Exported configuration to {}", output.display());
    Ok(())
}

/// Replace the configuration in effect with the content of another file.
///
/// The file is parsed first, so a broken import leaves the current
/// configuration untouched.
pub fn import(sub_matches: &ArgMatches, options: &GlobalOptions) -> Result<(), CliError> {
    let input = sub_matches
        .get_one::<PathBuf>(PARAMETER_FILE)
        .ok_or_else(|| CliError::MissingRequiredArgument(PARAMETER_FILE.to_string()))?;

    let configuration = Configuration::load_from_file(input)?;
    let destination = options.configuration_path()?;
    debug!("Importing {} into {}", input.display(), destination.display());
    configuration.save(&destination)?;
    info!("Imported configuration from {}", input.display());
    Ok(())
}
