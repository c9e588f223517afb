//! Query filters for list endpoints.
//!
//! ezyVet list endpoints accept filters as query parameters, e.g.
//! `/animal?id=22&active=1`. Comparison filters are JSON objects such as
//! `created_at={"gt":1498690800}`.

use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("the filter string supplied is invalid JSON ({0}), check the filter and try again, e.g. '{{\"id\":22}}'")]
    InvalidJson(#[from] serde_json::Error),
    #[error("the filter must be a JSON object such as '{{\"id\":22}}', got: {0}")]
    NotAnObject(String),
    #[error("failed to encode filter as a query string: {0}")]
    EncodingError(#[from] serde_urlencoded::ser::Error),
}

/// An opaque set of query filters, passed through to the API as-is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Query pairs in key order. `null` values are left out.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .0
            .iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    nested => nested.to_string(),
                };
                Some((key.clone(), value))
            })
            .collect();
        pairs.sort();
        pairs
    }

    pub fn to_query_string(&self) -> Result<String, FilterError> {
        Ok(serde_urlencoded::to_string(self.query_pairs())?)
    }

    /// Parse a filter given on the command line. A blank string is an empty filter.
    pub fn parse_optional(s: Option<&str>) -> Result<Option<Filter>, FilterError> {
        match s {
            Some(s) if !s.trim().is_empty() => {
                let filter = s.parse::<Filter>()?;
                Ok((!filter.is_empty()).then_some(filter))
            }
            _ => Ok(None),
        }
    }
}

impl FromStr for Filter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Filter::new());
        }

        match serde_json::from_str::<Value>(s)? {
            Value::Object(map) => Ok(Filter(map)),
            other => Err(FilterError::NotAnObject(other.to_string())),
        }
    }
}

impl From<Map<String, Value>> for Filter {
    fn from(map: Map<String, Value>) -> Self {
        Filter(map)
    }
}
