//! Shared command parameters for all CLI commands.
//!
//! Command and parameter names live here so the command definitions and the
//! actions reading the parsed values agree on them.

use crate::format::{OutputFormat, JSON, YAML};
use clap::builder::BoolishValueParser;
use clap::{Arg, ArgAction};
use std::path::PathBuf;

// Top level commands
pub const COMMAND_FETCH: &str = "fetch";
pub const COMMAND_RESOURCES: &str = "resources";
pub const COMMAND_APPOINTMENT_STATUS: &str = "appointment-status";
pub const COMMAND_AUTH: &str = "auth";
pub const COMMAND_CONFIG: &str = "config";

// Appointment status commands
pub const COMMAND_LOOKUP: &str = "lookup";

// Auth commands
pub const COMMAND_TEST: &str = "test";
pub const COMMAND_LOGIN: &str = "login";
pub const COMMAND_TOKEN: &str = "token";
pub const COMMAND_CLEAR_TOKEN: &str = "clear-token";

// Config commands
pub const COMMAND_PATH: &str = "path";
pub const COMMAND_SHOW: &str = "show";
pub const COMMAND_EXPORT: &str = "export";
pub const COMMAND_IMPORT: &str = "import";

// Global parameter names
pub const PARAMETER_VERBOSE: &str = "verbose";
pub const PARAMETER_DEBUG: &str = "debug";
pub const PARAMETER_SANDBOX: &str = "sandbox";
pub const PARAMETER_CONFIG_FILE: &str = "config-file";

// Parameter names
pub const PARAMETER_FILTER: &str = "filter";
pub const PARAMETER_MAX: &str = "max";
pub const PARAMETER_ALL: &str = "all";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_OUTPUT: &str = "output";
pub const PARAMETER_FILE: &str = "file";
pub const PARAMETER_LOOKUP: &str = "lookup";

pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Verbose output")
}

pub fn debug_parameter() -> Arg {
    Arg::new(PARAMETER_DEBUG)
        .short('d')
        .long(PARAMETER_DEBUG)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Very verbose output")
}

pub fn sandbox_parameter() -> Arg {
    Arg::new(PARAMETER_SANDBOX)
        .long(PARAMETER_SANDBOX)
        .action(ArgAction::SetTrue)
        .global(true)
        .env("EZYVET_SANDBOX")
        .value_parser(BoolishValueParser::new())
        .help("Use the sandbox (trial) API instead of production")
}

pub fn config_file_parameter() -> Arg {
    Arg::new(PARAMETER_CONFIG_FILE)
        .long("config")
        .num_args(1)
        .global(true)
        .value_parser(clap::value_parser!(PathBuf))
        .help("Configuration file to use instead of the default one")
}

/// Create the format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("EZYVET_FORMAT")
        .default_value(JSON)
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

/// Format parameter for documents that have no tabular form.
/// Not bound to `EZYVET_FORMAT`, which may name a tabular format.
pub fn document_format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .default_value(JSON)
        .help("Output data format")
        .value_parser([JSON, YAML])
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .short('p')
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .required(false)
        .help("Human readable output")
}

pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .required(false)
        .env("EZYVET_HEADERS")
        .value_parser(BoolishValueParser::new())
        .help("Format CSV output with a header row")
}

pub fn filter_parameter() -> Arg {
    Arg::new(PARAMETER_FILTER)
        .num_args(1)
        .required(false)
        .value_name("FILTER")
        .help("Filter as a JSON object, e.g. '{\"id\":22}'")
}

pub fn max_parameter() -> Arg {
    Arg::new(PARAMETER_MAX)
        .short('m')
        .long(PARAMETER_MAX)
        .num_args(1)
        .required(false)
        .value_parser(clap::value_parser!(u64))
        .help("Maximum number of records, rounded to the nearest 10 [default: 10]")
}

pub fn all_parameter() -> Arg {
    Arg::new(PARAMETER_ALL)
        .long(PARAMETER_ALL)
        .action(ArgAction::SetTrue)
        .conflicts_with(PARAMETER_MAX)
        .help("Fetch every page")
}

pub fn output_file_parameter() -> Arg {
    Arg::new(PARAMETER_OUTPUT)
        .short('o')
        .long(PARAMETER_OUTPUT)
        .num_args(1)
        .required(true)
        .help("Output file path")
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn file_parameter() -> Arg {
    Arg::new(PARAMETER_FILE)
        .long(PARAMETER_FILE)
        .num_args(1)
        .required(true)
        .help("Input file path")
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn lookup_parameter() -> Arg {
    Arg::new(PARAMETER_LOOKUP)
        .num_args(1)
        .required(true)
        .value_name("ID_OR_NAME")
        .help("Status id to get the name of, or status name to get the id of")
}
