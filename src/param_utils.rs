use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{debug, trace};

use crate::{
    client::PageLimit,
    commands::params::{
        PARAMETER_ALL, PARAMETER_CONFIG_FILE, PARAMETER_DEBUG, PARAMETER_FORMAT,
        PARAMETER_HEADERS, PARAMETER_MAX, PARAMETER_PRETTY, PARAMETER_SANDBOX,
        PARAMETER_VERBOSE,
    },
    configuration::{Configuration, Environment},
    error::CliError,
    format::{OutputFormat, OutputFormatOptions},
};

/// Follow the chain of subcommands down to the one that was invoked.
///
/// Global arguments are only propagated downwards by clap, so their values
/// have to be read from the innermost matches.
pub fn leaf_matches(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub_matches)) = current.subcommand() {
        current = sub_matches;
    }
    current
}

fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches
        .try_get_one::<bool>(id)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// Values of the arguments every command accepts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobalOptions {
    pub environment: Environment,
    pub config_file: Option<PathBuf>,
    pub verbose: bool,
    pub debug: bool,
}

impl GlobalOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let leaf = leaf_matches(matches);
        let environment = if flag(leaf, PARAMETER_SANDBOX) {
            Environment::Sandbox
        } else {
            Environment::Production
        };

        Self {
            environment,
            config_file: leaf
                .try_get_one::<PathBuf>(PARAMETER_CONFIG_FILE)
                .ok()
                .flatten()
                .cloned(),
            verbose: flag(leaf, PARAMETER_VERBOSE),
            debug: flag(leaf, PARAMETER_DEBUG),
        }
    }

    /// Log level for this crate when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "error"
        }
    }

    /// Path of the configuration file in effect
    pub fn configuration_path(&self) -> Result<PathBuf, CliError> {
        match &self.config_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Configuration::get_default_configuration_file_path()?),
        }
    }

    pub fn load_configuration(&self) -> Result<Configuration, CliError> {
        let path = self.configuration_path()?;
        debug!("Loading configuration from {}", path.display());
        Ok(Configuration::load_from_file(&path)?)
    }
}

pub fn get_format_parameter_value(sub_matches: &ArgMatches) -> Result<OutputFormat, CliError> {
    trace!("Resolving output format options...");

    let format = sub_matches
        .get_one::<String>(PARAMETER_FORMAT)
        .map(String::as_str)
        .unwrap_or(crate::format::JSON);
    let with_headers = flag(sub_matches, PARAMETER_HEADERS);
    let pretty = flag(sub_matches, PARAMETER_PRETTY);

    trace!("Format: {}", format);
    trace!("With headers: {}", with_headers);
    trace!("Pretty: {}", pretty);

    let options = OutputFormatOptions {
        with_headers,
        pretty,
    };

    Ok(OutputFormat::from_string_with_options(format, options)?)
}

/// Page limit from `--all` or `--max`, one page when neither is given
pub fn get_page_limit(sub_matches: &ArgMatches) -> PageLimit {
    if flag(sub_matches, PARAMETER_ALL) {
        return PageLimit::Unlimited;
    }

    match sub_matches.try_get_one::<u64>(PARAMETER_MAX).ok().flatten() {
        Some(max) => PageLimit::from_record_count(*max),
        None => PageLimit::default(),
    }
}
