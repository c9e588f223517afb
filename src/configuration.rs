//! Configuration management for the ezyVet CLI client.
//!
//! Credentials, scope and API endpoints live in a YAML file under the platform
//! configuration directory (`~/.config/ezyvet/config.yml` on Linux). The
//! directory can be moved with the `EZYVET_CONFIG_DIR` environment variable.

use crate::format::{Formattable, FormattingError, OutputFormat};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use strum::{Display, EnumString};
use tracing::debug;
use url::Url;

pub const DEFAULT_APPLICATION_ID: &str = "ezyvet";
pub const DEFAULT_CONFIGURATION_FILE_NAME: &str = "config.yml";
pub const CONFIG_DIR_ENV_VAR: &str = "EZYVET_CONFIG_DIR";
pub const DEFAULT_PRODUCTION_URL: &str = "https://api.ezyvet.com/v1";
pub const DEFAULT_SANDBOX_URL: &str = "https://api.trial.ezyvet.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const REDACTED: &str = "********";

/// Scopes requested when the configuration does not list any: read access to
/// every list endpoint ezyVet grants partner integrations by default.
pub const DEFAULT_SCOPE: [&str; 49] = [
    "read-address",
    "read-animal",
    "read-animalcolour",
    "read-appointment",
    "read-appointmentstatus",
    "read-appointmenttype",
    "read-assessment",
    "read-attachment",
    "read-breed",
    "read-consult",
    "read-contact",
    "read-contactdetail",
    "read-contactdetailtype",
    "read-country",
    "read-diagnostic",
    "read-diagnosticrequest",
    "read-diagnosticresult",
    "read-diagnosticresultitem",
    "read-healthstatus",
    "read-history",
    "read-integrateddiagnostic",
    "read-invoice",
    "read-invoiceline",
    "read-operation",
    "read-payment",
    "read-paymentallocation",
    "read-paymentmethod",
    "read-physicalexam",
    "read-plan",
    "read-prescription",
    "read-prescriptionitem",
    "read-presentingproblem",
    "read-presentingproblemlink",
    "read-product",
    "read-productgroup",
    "read-purchaseorder",
    "read-purchaseorderitem",
    "read-receiveinvoice",
    "read-receiveinvoiceitem",
    "read-resource",
    "read-separation",
    "read-sex",
    "read-species",
    "read-systemsetting",
    "read-tag",
    "read-tagcategory",
    "read-therapeutic",
    "read-user",
    "read-vaccination",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to resolve the configuration directory")]
    FailedToFindConfigurationDirectory,
    #[error("failed to load configuration from {path:?}, because of: {cause}")]
    FailedToLoadData {
        path: PathBuf,
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("failed to write configuration data to file, because of: {cause}")]
    FailedToWriteData {
        cause: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("missing value for property {name:?}; fill it in with your ezyVet partner credentials")]
    MissingRequiredPropertyValue { name: String },
    #[error("{cause}")]
    FormattingError {
        #[from]
        cause: FormattingError,
    },
}

/// Which ezyVet deployment to talk to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    /// Base URL used when the configuration does not name one
    pub fn default_url(&self) -> Url {
        let url = match self {
            Environment::Production => DEFAULT_PRODUCTION_URL,
            Environment::Sandbox => DEFAULT_SANDBOX_URL,
        };
        // both are compile-time constants known to parse
        Url::parse(url).unwrap_or_else(|_| unreachable!("invalid built-in URL {url}"))
    }
}

/// Endpoint and client credentials of one ezyVet deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
}

impl EnvironmentConfiguration {
    fn for_environment(environment: Environment) -> Self {
        Self {
            url: Some(environment.default_url()),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }

    fn redacted(&self) -> Self {
        let client_secret = if self.client_secret.is_empty() {
            String::new()
        } else {
            REDACTED.to_string()
        };

        Self {
            client_secret,
            ..self.clone()
        }
    }
}

fn default_production() -> EnvironmentConfiguration {
    EnvironmentConfiguration::for_environment(Environment::Production)
}

fn default_sandbox() -> EnvironmentConfiguration {
    EnvironmentConfiguration::for_environment(Environment::Sandbox)
}

fn default_scope() -> Vec<String> {
    DEFAULT_SCOPE.iter().map(|s| s.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    partner_id: String,
    #[serde(default = "default_scope")]
    scope: Vec<String>,
    #[serde(default = "default_production")]
    production: EnvironmentConfiguration,
    #[serde(default = "default_sandbox")]
    sandbox: EnvironmentConfiguration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_dir: Option<PathBuf>,
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            partner_id: String::new(),
            scope: default_scope(),
            production: default_production(),
            sandbox: default_sandbox(),
            token_dir: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Configuration {
    pub fn new(partner_id: impl Into<String>, scope: Vec<String>) -> Self {
        Self {
            partner_id: partner_id.into(),
            scope,
            ..Self::default()
        }
    }

    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }

    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// Scope as the token endpoint expects it: a comma separated list
    pub fn scope_string(&self) -> String {
        self.scope.join(",")
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn environment(&self, environment: Environment) -> &EnvironmentConfiguration {
        match environment {
            Environment::Production => &self.production,
            Environment::Sandbox => &self.sandbox,
        }
    }

    /// Base URL of `environment`, the built-in one when the file leaves it out
    pub fn base_url(&self, environment: Environment) -> Url {
        self.environment(environment)
            .url
            .clone()
            .unwrap_or_else(|| environment.default_url())
    }

    pub fn environment_mut(&mut self, environment: Environment) -> &mut EnvironmentConfiguration {
        match environment {
            Environment::Production => &mut self.production,
            Environment::Sandbox => &mut self.sandbox,
        }
    }

    pub fn set_token_dir(&mut self, token_dir: Option<PathBuf>) {
        self.token_dir = token_dir;
    }

    /// Directory holding the stored token and the last token error.
    ///
    /// Falls back to the configuration directory when `token_dir` is not set.
    pub fn token_dir(&self) -> Result<PathBuf, ConfigurationError> {
        match &self.token_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::get_default_configuration_directory(),
        }
    }

    /// Check that the selected environment has everything the token endpoint needs
    pub fn validate(&self, environment: Environment) -> Result<(), ConfigurationError> {
        let env = self.environment(environment);
        let missing = |name: &str| ConfigurationError::MissingRequiredPropertyValue {
            name: name.to_string(),
        };

        if self.partner_id.trim().is_empty() {
            return Err(missing("partner_id"));
        }
        if env.client_id.trim().is_empty() {
            return Err(missing(&format!("{}.client_id", environment)));
        }
        if env.client_secret.trim().is_empty() {
            return Err(missing(&format!("{}.client_secret", environment)));
        }
        if self.scope.iter().all(|s| s.trim().is_empty()) {
            return Err(missing("scope"));
        }

        Ok(())
    }

    /// Copy of the configuration that is safe to print
    pub fn redacted(&self) -> Configuration {
        Configuration {
            production: self.production.redacted(),
            sandbox: self.sandbox.redacted(),
            ..self.clone()
        }
    }

    pub fn get_default_configuration_directory() -> Result<PathBuf, ConfigurationError> {
        if let Ok(config_dir_str) = std::env::var(CONFIG_DIR_ENV_VAR) {
            return Ok(PathBuf::from(config_dir_str));
        }

        match config_dir() {
            Some(mut directory) => {
                directory.push(DEFAULT_APPLICATION_ID);
                Ok(directory)
            }
            None => Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }
    }

    pub fn get_default_configuration_file_path() -> Result<PathBuf, ConfigurationError> {
        let mut path = Self::get_default_configuration_directory()?;
        path.push(DEFAULT_CONFIGURATION_FILE_NAME);
        Ok(path)
    }

    pub fn load_default() -> Result<Configuration, ConfigurationError> {
        let default_file_path = Configuration::get_default_configuration_file_path()?;
        debug!("Loading configuration from {}...", default_file_path.display());
        Configuration::load_from_file(&default_file_path)
    }

    pub fn load_from_file(path: &Path) -> Result<Configuration, ConfigurationError> {
        let failed = |cause: Box<dyn std::error::Error + Send + Sync>| {
            ConfigurationError::FailedToLoadData {
                path: path.to_path_buf(),
                cause,
            }
        };

        let content = fs::read_to_string(path).map_err(|e| failed(Box::new(e)))?;
        serde_yaml::from_str(&content).map_err(|e| failed(Box::new(e)))
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), ConfigurationError> {
        serde_yaml::to_writer(writer, self)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigurationError> {
        // first check if the parent directory exists and try to create it if not
        match path.parent() {
            Some(directory) => {
                fs::create_dir_all(directory)
                    .map_err(|_| ConfigurationError::FailedToFindConfigurationDirectory)?;
            }
            None => return Err(ConfigurationError::FailedToFindConfigurationDirectory),
        }

        let file = File::create(path)
            .map_err(|e| ConfigurationError::FailedToWriteData { cause: Box::new(e) })?;
        self.write(file)
    }
}

impl Formattable for Configuration {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError> {
        match f {
            OutputFormat::Json(options) => {
                if options.pretty {
                    Ok(serde_json::to_string_pretty(self)?)
                } else {
                    Ok(serde_json::to_string(self)?)
                }
            }
            OutputFormat::Yaml(_) => serde_yaml::to_string(self)
                .map_err(|e| FormattingError::FormatFailure { cause: Box::new(e) }),
            OutputFormat::Csv(_) => Err(FormattingError::UnsupportedOutputFormat(f.to_string())),
        }
    }
}
