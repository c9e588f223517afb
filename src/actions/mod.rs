//! Implementations of the CLI commands.
//!
//! Each action receives the matches of its own (innermost) subcommand and
//! the global options, and writes its result to stdout.

use crate::{
    error::CliError,
    format::{Formattable, OutputFormat},
};

pub mod appointment_status;
pub mod auth;
pub mod config;
pub mod fetch;
pub mod resources;

/// Format `value` and print it, printing nothing for empty output
pub fn print_formatted<T: Formattable>(value: &T, format: &OutputFormat) -> Result<(), CliError> {
    let output = value.format(format)?;
    let output = output.trim_end();
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
