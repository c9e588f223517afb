use reqwest::header::{AUTHORIZATION, CACHE_CONTROL};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};
use url::Url;

use crate::client::endpoint_url;
use crate::configuration::{Configuration, ConfigurationError, Environment};
use crate::token_store::{AccessToken, TokenStore, TokenStoreError};

pub const TOKEN_PATH: &str = "/oauth/access_token";

/// Cheap authenticated request used to check a token: address 1 is ezyVet's
/// own office and exists on every deployment.
pub const VALIDATION_PATH: &str = "/address";
pub const VALIDATION_QUERY: [(&str, &str); 1] = [("id", "1")];

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Token storage error: {0}")]
    TokenStoreError(#[from] TokenStoreError),
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("HTTP {status}: received a message instead of an access token: {details} (response saved to {error_file:?})")]
    NoAccessToken {
        status: StatusCode,
        details: String,
        error_file: PathBuf,
    },
    #[error("refreshing the token did not work, the API still answers the validation request with HTTP {0}")]
    TokenRejected(StatusCode),
}

/// What the token endpoint needs to hand out a token
#[derive(Debug, Clone)]
pub struct Credentials {
    pub partner_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

impl Credentials {
    pub fn from_configuration(
        configuration: &Configuration,
        environment: Environment,
    ) -> Result<Self, ConfigurationError> {
        configuration.validate(environment)?;
        let env = configuration.environment(environment);
        let scope = configuration.scope_string();
        debug!("Scope: {}", scope);

        Ok(Self {
            partner_id: configuration.partner_id().to_string(),
            client_id: env.client_id.clone(),
            client_secret: env.client_secret.clone(),
            scope,
        })
    }
}

/// Turn an OAuth error body into something a user can act on
fn describe_oauth_error(response: &Value) -> String {
    let Some(error_val) = response.get("error") else {
        return response.to_string();
    };
    let error_str = error_val.as_str().unwrap_or("unknown");

    let error_description = match response
        .get("error_description")
        .or_else(|| response.get("message"))
        .and_then(Value::as_str)
    {
        Some(desc) => format!(" - {}", desc),
        None => String::new(),
    };

    match error_str {
        "invalid_client" => format!(
            "Invalid client credentials{}. Please check the partner id, client id and secret.",
            error_description
        ),
        "invalid_scope" => format!(
            "Invalid scope{}. Check the scope list against what your partner account may request.",
            error_description
        ),
        "unauthorized_client" => format!(
            "Unauthorized client{}. The client is not authorized to use this authorization grant type.",
            error_description
        ),
        "invalid_request" => format!(
            "Invalid request{}. The request is missing required parameters or contains invalid parameters.",
            error_description
        ),
        _ => format!("{}{}", error_str, error_description),
    }
}

/// Acquires, validates, persists and refreshes the bearer token
pub struct TokenManager {
    http: Client,
    base_url: Url,
    credentials: Credentials,
    store: TokenStore,
}

impl TokenManager {
    pub fn new(http: Client, base_url: Url, credentials: Credentials, store: TokenStore) -> Self {
        Self {
            http,
            base_url,
            credentials,
            store,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get a fresh access token from the API and store it
    pub async fn fetch_token(&self) -> Result<AccessToken, AuthError> {
        let url = endpoint_url(&self.base_url, TOKEN_PATH);
        info!("Requesting a new access token from {}", url);

        let params = [
            ("partner_id", self.credentials.partner_id.as_str()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", self.credentials.scope.as_str()),
        ];

        let response = self
            .http
            .post(&url)
            .header(CACHE_CONTROL, "no-cache")
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Token response status: {}", status);
        trace!("Token response body: {}", body);

        let response: Value = match serde_json::from_str(&body) {
            Ok(response) => response,
            Err(e) => {
                warn!("Token response is not JSON: {}. Raw response: {}", e, body);
                return Err(AuthError::AuthFailed(format!("HTTP {} {}", status, body)));
            }
        };

        if response.get("access_token").and_then(Value::as_str).is_none() {
            error!("We got a message, not an access token: {}", response);
            let error_file = self.store.save_error(&response)?;
            info!("Wrote error to {}", error_file.display());
            return Err(AuthError::NoAccessToken {
                status,
                details: describe_oauth_error(&response),
                error_file,
            });
        }

        let token: AccessToken = serde_json::from_value(response)?;
        self.store.save(&token)?;
        info!("Got access token, wrote it to {}", self.store.path().display());
        trace!("Access token: {}", token.access_token);
        Ok(token)
    }

    /// Call the API with `token` and return the status it answers with
    pub async fn test_token(&self, token: &AccessToken) -> Result<StatusCode, AuthError> {
        let url = endpoint_url(&self.base_url, VALIDATION_PATH);
        trace!("Testing token {}", token.access_token);

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token.bearer())
            .header(CACHE_CONTROL, "no-cache")
            .query(&VALIDATION_QUERY)
            .send()
            .await?;

        let status = response.status();
        debug!("Token validation answered {}", status);
        Ok(status)
    }

    /// Return a token the API accepts.
    ///
    /// The stored token is tried first. If the API rejects it, one new token
    /// is fetched and tested; if that is rejected too, give up.
    pub async fn acquire(&self) -> Result<AccessToken, AuthError> {
        info!("Reading stored access token.");
        let token = match self.store.load() {
            Some(token) => token,
            None => {
                info!("No stored token, fetching new one.");
                self.fetch_token().await?
            }
        };

        info!("Testing token.");
        let status = self.test_token(&token).await?;
        if status == StatusCode::OK {
            return Ok(token);
        }

        info!("Test failed with {}, refreshing token.", status);
        let token = self.fetch_token().await?;

        info!("Re-testing token.");
        let status = self.test_token(&token).await?;
        if status == StatusCode::OK {
            Ok(token)
        } else {
            error!("Refreshing token did not work ({}), quitting.", status);
            Err(AuthError::TokenRejected(status))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_invalid_client() {
        let message = describe_oauth_error(&json!({
            "error": "invalid_client",
            "error_description": "Client authentication failed."
        }));
        assert!(message.starts_with("Invalid client credentials - Client authentication failed."));
    }

    #[test]
    fn test_describe_unknown_error_keeps_code() {
        let message = describe_oauth_error(&json!({"error": "server_error"}));
        assert_eq!(message, "server_error");
    }

    #[test]
    fn test_describe_without_error_field() {
        let message = describe_oauth_error(&json!({"messages": ["nope"]}));
        assert_eq!(message, r#"{"messages":["nope"]}"#);
    }

    #[test]
    fn test_credentials_require_complete_configuration() {
        let configuration = Configuration::new("partner", vec!["read-animal".to_string()]);
        assert!(matches!(
            Credentials::from_configuration(&configuration, Environment::Production),
            Err(ConfigurationError::MissingRequiredPropertyValue { .. })
        ));
    }
}
