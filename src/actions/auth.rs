use clap::ArgMatches;
use reqwest::StatusCode;
use tracing::info;

use crate::{
    actions::print_formatted,
    auth::AuthError,
    client::{token_manager, EzyVetClient},
    error::CliError,
    param_utils::{get_format_parameter_value, GlobalOptions},
    token_store::TokenStore,
};

fn token_store(options: &GlobalOptions) -> Result<TokenStore, CliError> {
    let configuration = options.load_configuration()?;
    Ok(TokenStore::new(
        configuration.token_dir()?,
        options.environment,
    ))
}

/// Make sure a working token is available, refreshing it if needed
pub async fn test(options: &GlobalOptions) -> Result<(), CliError> {
    let configuration = options.load_configuration()?;
    let client = EzyVetClient::connect(&configuration, options.environment).await?;
    println!(
        "Access token accepted by the {} API at {}",
        options.environment,
        client.base_url()
    );
    Ok(())
}

/// Fetch a new token even when the stored one still works
pub async fn login(options: &GlobalOptions) -> Result<(), CliError> {
    let configuration = options.load_configuration()?;
    let (_, manager) = token_manager(&configuration, options.environment)?;

    let token = manager.fetch_token().await?;
    let status = manager.test_token(&token).await?;
    if status != StatusCode::OK {
        return Err(AuthError::TokenRejected(status).into());
    }

    info!("New token validated");
    println!(
        "Logged in to the {} API, token saved to {}",
        options.environment,
        manager.store().path().display()
    );
    Ok(())
}

pub fn token(sub_matches: &ArgMatches, options: &GlobalOptions) -> Result<(), CliError> {
    let store = token_store(options)?;
    let format = get_format_parameter_value(sub_matches)?;

    match store.load() {
        Some(token) => print_formatted(&serde_json::to_value(&token)?, &format),
        None => Err(CliError::NoStoredToken(store.path())),
    }
}

pub fn clear_token(options: &GlobalOptions) -> Result<(), CliError> {
    let store = token_store(options)?;
    if store.clear()? {
        println!("Removed {}", store.path().display());
    } else {
        println!("No stored token at {}", store.path().display());
    }
    Ok(())
}
