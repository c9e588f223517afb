//! HTTP client for the ezyVet API.
//!
//! Every list endpoint answers with one page of at most ten records:
//!
//! ```json
//! {"meta": {"items_page_total": 4, ...}, "items": [{"animal": {...}}, ...]}
//! ```
//!
//! [`EzyVetClient::fetch_all`] walks those pages and returns the items of all
//! of them as one flat list. The per-resource accessors in
//! [`crate::resources`] are thin wrappers around it.

use std::num::NonZeroU32;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CACHE_CONTROL};
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error, info, trace};
use url::Url;

use crate::auth::{AuthError, Credentials, TokenManager};
use crate::configuration::{Configuration, ConfigurationError, Environment};
use crate::filter::{Filter, FilterError};
use crate::resources::Resource;
use crate::token_store::{AccessToken, TokenStore};

/// Records per page on every ezyVet list endpoint
pub const RECORDS_PER_PAGE: u64 = 10;

pub const PAGE_PARAMETER: &str = "page";

/// Error emitted by the ezyVet API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("unable to retrieve {path} (page {page}), received HTTP {status}: {body}")]
    UnexpectedStatus {
        path: String,
        page: u32,
        status: StatusCode,
        body: String,
    },
    #[error("unexpected response from {path} (page {page}): {reason}")]
    MalformedPage {
        path: String,
        page: u32,
        reason: String,
    },
    #[error(transparent)]
    AuthError(#[from] AuthError),
    #[error(transparent)]
    ConfigurationError(#[from] ConfigurationError),
    #[error(transparent)]
    FilterError(#[from] FilterError),
}

/// How many pages a paginated fetch may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    Pages(NonZeroU32),
    Unlimited,
}

impl PageLimit {
    /// A limit of `pages` pages; zero is treated as one
    pub fn pages(pages: u32) -> Self {
        PageLimit::Pages(NonZeroU32::new(pages).unwrap_or(NonZeroU32::MIN))
    }

    /// Limit derived from a record count: rounded to the nearest multiple of
    /// ten (never below ten) and divided into ten-record pages.
    pub fn from_record_count(records: u64) -> Self {
        let rounded = if records < RECORDS_PER_PAGE {
            RECORDS_PER_PAGE
        } else {
            let lower = (records / RECORDS_PER_PAGE) * RECORDS_PER_PAGE;
            let upper = lower + RECORDS_PER_PAGE;
            // ties go to the lower multiple
            if records - lower > upper - records {
                upper
            } else {
                lower
            }
        };

        let pages = u32::try_from(rounded / RECORDS_PER_PAGE).unwrap_or(u32::MAX);
        PageLimit::pages(pages)
    }

    fn reached(&self, page: u32) -> bool {
        match self {
            PageLimit::Pages(limit) => page >= limit.get(),
            PageLimit::Unlimited => false,
        }
    }
}

impl Default for PageLimit {
    fn default() -> Self {
        PageLimit::Pages(NonZeroU32::MIN)
    }
}

impl std::fmt::Display for PageLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PageLimit::Pages(pages) => write!(f, "{} page(s)", pages),
            PageLimit::Unlimited => write!(f, "all pages"),
        }
    }
}

/// Build the shared HTTP client
pub fn build_http_client(timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Join an endpoint path onto the API base URL.
///
/// `Url::join` would drop the `/v1` segment of the base, so plain string
/// concatenation is used instead.
pub fn endpoint_url(base_url: &Url, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Validate the configuration and set up token handling for `environment`.
///
/// Returns the HTTP client alongside the manager so both share one
/// connection pool.
pub fn token_manager(
    configuration: &Configuration,
    environment: Environment,
) -> Result<(Client, TokenManager), ApiError> {
    let credentials = Credentials::from_configuration(configuration, environment)?;
    let base_url = configuration.base_url(environment);
    info!("Using {} API at {}", environment, base_url);

    let store = TokenStore::new(configuration.token_dir()?, environment);
    info!("Using token file {}", store.path().display());

    let http = build_http_client(configuration.timeout_secs())?;
    let manager = TokenManager::new(http.clone(), base_url, credentials, store);
    Ok((http, manager))
}

/// Total page count from a page's `meta` block. ezyVet has been seen to send
/// it both as a number and as a numeric string.
/// Integer value of a JSON number or numeric string. Fractions are truncated,
/// so `3.0`, `"3"` and `"03"` all read as 3.
pub(crate) fn json_integer(value: &Value) -> Option<i64> {
    let number = match value {
        Value::Number(n) => return n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => s.trim(),
        _ => return None,
    };
    number
        .parse::<i64>()
        .ok()
        .or_else(|| number.parse::<f64>().ok().and_then(truncate))
}

fn truncate(value: f64) -> Option<i64> {
    value
        .is_finite()
        .then(|| value.trunc())
        .filter(|v| *v >= i64::MIN as f64 && *v <= i64::MAX as f64)
        .map(|v| v as i64)
}

fn page_total(meta: &Value) -> Option<u64> {
    json_integer(meta.get("items_page_total")?).and_then(|total| u64::try_from(total).ok())
}

pub struct EzyVetClient {
    http: Client,
    base_url: Url,
    token: AccessToken,
}

impl EzyVetClient {
    pub fn new(http: Client, base_url: Url, token: AccessToken) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Validate the configuration, then obtain a working token for the
    /// selected environment (stored, or freshly fetched).
    pub async fn connect(
        configuration: &Configuration,
        environment: Environment,
    ) -> Result<Self, ApiError> {
        let (http, manager) = token_manager(configuration, environment)?;
        let token = manager.acquire().await?;

        info!("Init complete.");
        Ok(Self::new(http, manager.base_url().clone(), token))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch up to `limit` pages of `path` and return their items.
    ///
    /// The first page is requested without a `page` parameter. Any status
    /// other than 200 ends the fetch with an error; nothing is retried.
    pub async fn fetch_all(
        &self,
        path: &str,
        filter: Option<&Filter>,
        limit: PageLimit,
    ) -> Result<Vec<Value>, ApiError> {
        let url = endpoint_url(&self.base_url, path);
        let filter_pairs = filter.map(Filter::query_pairs).unwrap_or_default();
        if let Some(filter) = filter {
            info!("Adding query string to {}: {}", path, filter.to_query_string()?);
        }
        debug!("Fetching {} with a limit of {}", url, limit);

        let mut page: u32 = 1;
        let mut items = Vec::new();
        loop {
            let mut query = filter_pairs.clone();
            if page > 1 {
                query.push((PAGE_PARAMETER.to_string(), page.to_string()));
            }

            let response = self
                .http
                .get(&url)
                .header(AUTHORIZATION, self.token.bearer())
                .header(CACHE_CONTROL, "no-cache")
                .query(&query)
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            trace!("Response for {} page {}: {}", path, page, body);

            if status != StatusCode::OK {
                error!("Unable to retrieve {} page {}, received {}", path, page, status);
                return Err(ApiError::UnexpectedStatus {
                    path: path.to_string(),
                    page,
                    status,
                    body,
                });
            }

            let malformed = |reason: &str| ApiError::MalformedPage {
                path: path.to_string(),
                page,
                reason: reason.to_string(),
            };

            let mut data: Map<String, Value> = match serde_json::from_str::<Value>(&body)? {
                Value::Object(data) => data,
                _ => return Err(malformed("body is not a JSON object")),
            };
            let pages = match data.get("meta") {
                Some(meta) => page_total(meta).ok_or_else(|| {
                    malformed("meta.items_page_total is missing or not a number")
                })?,
                None => return Err(malformed("meta or items not in data")),
            };
            match data.remove("items") {
                Some(Value::Array(page_items)) => items.extend(page_items),
                Some(_) => return Err(malformed("items is not an array")),
                None => return Err(malformed("meta or items not in data")),
            }

            debug!("Fetched page {} of {} from {}", page, pages, path);
            if pages <= 1 || u64::from(page) >= pages || limit.reached(page) {
                break;
            }
            page += 1;
        }

        info!("Returned {} records from {}.", items.len(), path);
        Ok(items)
    }

    /// Fetch a resource from the endpoint table
    pub async fn list(
        &self,
        resource: Resource,
        filter: Option<&Filter>,
        limit: PageLimit,
    ) -> Result<Vec<Value>, ApiError> {
        self.fetch_all(resource.path(), filter, limit).await
    }
}
