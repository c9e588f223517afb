use thiserror::Error;

use crate::{
    auth::AuthError, client::ApiError, configuration::ConfigurationError, exit_codes::ExitCode,
    filter::FilterError, format::FormattingError, resources::UnknownResource,
    token_store::TokenStoreError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand: {0}")]
    UnsupportedSubcommand(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),
    /// The filter given on the command line could not be used
    #[error("{0}")]
    FilterError(#[from] FilterError),
    #[error("{0}")]
    UnknownResource(#[from] UnknownResource),
    #[error("Missing required argument: {0}")]
    MissingRequiredArgument(String),
    /// `auth token` was asked for a token that was never stored
    #[error("No stored access token at {0}, run `ezyvet auth login` first")]
    NoStoredToken(std::path::PathBuf),
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Token storage error: {0}")]
    TokenStoreError(#[from] TokenStoreError),
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),
    #[error("API error: {0}")]
    ApiError(ApiError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors the client only passes through keep their own category
impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::ConfigurationError(e) => CliError::ConfigurationError(e),
            ApiError::AuthError(e) => CliError::AuthError(e),
            ApiError::FilterError(e) => CliError::FilterError(e),
            other => CliError::ApiError(other),
        }
    }
}

fn http_error_exit_code(error: &reqwest::Error) -> ExitCode {
    if error.is_connect() || error.is_timeout() || error.is_request() {
        ExitCode::NetworkError
    } else if error.is_decode() {
        ExitCode::DataError
    } else {
        ExitCode::ApiError
    }
}

fn auth_exit_code(error: &AuthError) -> ExitCode {
    match error {
        AuthError::HttpError(e) => http_error_exit_code(e),
        AuthError::TokenStoreError(_) => ExitCode::OSError,
        AuthError::JsonError(_)
        | AuthError::AuthFailed(_)
        | AuthError::NoAccessToken { .. }
        | AuthError::TokenRejected(_) => ExitCode::AuthError,
    }
}

fn api_exit_code(error: &ApiError) -> ExitCode {
    match error {
        ApiError::HttpError(e) => http_error_exit_code(e),
        ApiError::JsonError(_) | ApiError::MalformedPage { .. } => ExitCode::DataError,
        ApiError::UnexpectedStatus { .. } => ExitCode::ApiError,
        ApiError::AuthError(e) => auth_exit_code(e),
        ApiError::ConfigurationError(_) => ExitCode::ConfigError,
        ApiError::FilterError(_) => ExitCode::UsageError,
    }
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::UnsupportedSubcommand(_)
            | CliError::MissingRequiredArgument(_)
            | CliError::FilterError(_)
            | CliError::UnknownResource(_) => ExitCode::UsageError,
            CliError::ConfigurationError(_) => ExitCode::ConfigError,
            CliError::FormattingError(_) | CliError::JsonError(_) => ExitCode::DataError,
            CliError::TokenStoreError(_) | CliError::IoError(_) => ExitCode::OSError,
            CliError::NoStoredToken(_) => ExitCode::AuthError,
            CliError::AuthError(e) => auth_exit_code(e),
            CliError::ApiError(e) => api_exit_code(e),
        }
    }
}
