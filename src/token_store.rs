//! On-disk storage for the bearer token.
//!
//! The token endpoint's whole JSON response is kept, so fields like
//! `expires_in` survive between runs even though only `access_token` is used.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

use crate::configuration::Environment;

pub const TOKEN_FILE_NAME: &str = "token.json";
pub const SANDBOX_TOKEN_FILE_NAME: &str = "token-sandbox.json";
pub const ERROR_FILE_NAME: &str = "err.json";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("failed to access token file {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A token as returned by `/oauth/access_token`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccessToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            extra: Map::new(),
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.extra.get("expires_in").and_then(Value::as_u64)
    }
}

#[derive(Debug, Clone)]
pub struct TokenStore {
    directory: PathBuf,
    file_name: &'static str,
}

impl TokenStore {
    pub fn new(directory: impl Into<PathBuf>, environment: Environment) -> Self {
        let file_name = match environment {
            Environment::Production => TOKEN_FILE_NAME,
            Environment::Sandbox => SANDBOX_TOKEN_FILE_NAME,
        };

        Self {
            directory: directory.into(),
            file_name,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name)
    }

    pub fn error_path(&self) -> PathBuf {
        self.directory.join(ERROR_FILE_NAME)
    }

    /// Read the stored token.
    ///
    /// Anything short of a readable JSON object with an `access_token` string
    /// counts as "no token": the caller will simply fetch a fresh one.
    pub fn load(&self) -> Option<AccessToken> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                debug!("No stored token at {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<AccessToken>(&content) {
            Ok(token) => {
                trace!("Loaded token {}", token.access_token);
                Some(token)
            }
            Err(e) => {
                debug!("Ignoring unreadable token file {}: {}", path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        self.write_json(&self.path(), &serde_json::to_value(token)?)
    }

    /// Keep a copy of a token response that did not contain a token
    pub fn save_error(&self, response: &Value) -> Result<PathBuf, TokenStoreError> {
        let path = self.error_path();
        self.write_json(&path, response)?;
        Ok(path)
    }

    pub fn clear(&self) -> Result<bool, TokenStoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(TokenStoreError::IoError { path, source }),
        }
    }

    fn write_json(&self, path: &Path, value: &Value) -> Result<(), TokenStoreError> {
        fs::create_dir_all(&self.directory).map_err(|source| TokenStoreError::IoError {
            path: self.directory.clone(),
            source,
        })?;

        let content = serde_json::to_string(value)?;
        fs::write(path, content).map_err(|source| TokenStoreError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}
