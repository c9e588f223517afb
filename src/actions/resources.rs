use clap::ArgMatches;

use crate::{
    actions::print_formatted,
    error::CliError,
    param_utils::get_format_parameter_value,
    resources::{Resource, ResourceDescription},
};

pub fn list_resources(sub_matches: &ArgMatches) -> Result<(), CliError> {
    let format = get_format_parameter_value(sub_matches)?;
    let rows = Resource::all()
        .map(ResourceDescription::from)
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;
    print_formatted(&serde_json::Value::Array(rows), &format)
}
