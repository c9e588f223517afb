use std::str::FromStr;

use clap::ArgMatches;
use tracing::{debug, info};

use crate::{
    actions::print_formatted,
    client::EzyVetClient,
    commands::params::PARAMETER_FILTER,
    error::CliError,
    filter::Filter,
    format::RecordList,
    param_utils::{get_format_parameter_value, get_page_limit, GlobalOptions},
    resources::Resource,
};

/// Fetch the records of one resource and print them.
///
/// The filter is checked before any request is made, so a typo in it never
/// costs a token round trip.
pub async fn fetch_resource(
    resource_name: &str,
    sub_matches: &ArgMatches,
    options: &GlobalOptions,
) -> Result<(), CliError> {
    let resource = Resource::from_str(resource_name)?;
    let filter = Filter::parse_optional(
        sub_matches
            .try_get_one::<String>(PARAMETER_FILTER)
            .ok()
            .flatten()
            .map(String::as_str),
    )?;
    let limit = get_page_limit(sub_matches);
    let format = get_format_parameter_value(sub_matches)?;
    debug!("Fetching {} with filter {:?}, {}", resource, filter, limit);

    let configuration = options.load_configuration()?;
    let client = EzyVetClient::connect(&configuration, options.environment).await?;
    let items = client.list(resource, filter.as_ref(), limit).await?;
    info!("Fetched {} {} record(s)", items.len(), resource);

    let records = RecordList::from(items);
    if records.is_empty() {
        return Ok(());
    }
    print_formatted(&records, &format)
}
