//! Appointment status codes.
//!
//! Appointments carry a numeric `appointment_status_id`; the names behind
//! those ids differ from clinic to clinic, so they have to be looked up.

use serde_json::Value;
use tracing::{debug, info};

use crate::client::{json_integer, ApiError, EzyVetClient, PageLimit};

const WRAPPER_KEY: &str = "appointmentstatus";

/// What a lookup string refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLookup {
    /// An integer: find the name of the status with this id
    Id(i64),
    /// Anything else: find the id of the status with this name
    Name(String),
}

impl StatusLookup {
    pub fn parse(lookup: &str) -> Self {
        let lookup = lookup.trim();
        match lookup.parse::<i64>() {
            Ok(id) => StatusLookup::Id(id),
            Err(_) => StatusLookup::Name(lookup.to_string()),
        }
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Ids compare as numbers: `"02"`, `2` and `2.0` are the same status
fn same_id(id: &Value, wanted: i64) -> bool {
    json_integer(id) == Some(wanted)
}

/// Search a list of `{"appointmentstatus": {"id": .., "name": ..}}` items.
///
/// Returns the name for an id lookup and the id for a name lookup.
pub fn find_status(statuses: &[Value], lookup: &StatusLookup) -> Option<Value> {
    statuses
        .iter()
        .filter_map(|item| item.get(WRAPPER_KEY))
        .find_map(|status| {
            let id = status.get("id")?;
            let name = status.get("name")?;
            debug!("Examining status {} [{}]", name, id);

            match lookup {
                StatusLookup::Id(wanted) if same_id(id, *wanted) => Some(name.clone()),
                StatusLookup::Name(wanted) if as_text(name).as_deref() == Some(wanted.as_str()) => {
                    Some(id.clone())
                }
                _ => None,
            }
        })
}

impl EzyVetClient {
    /// Given a status id return its name; given a name return its id.
    pub async fn lookup_appointment_status(&self, lookup: &str) -> Result<Option<Value>, ApiError> {
        let lookup = StatusLookup::parse(lookup);
        info!("Looking up appointment status {:?}", lookup);

        let statuses = self
            .appointment_statuses(None, PageLimit::Unlimited)
            .await?;
        Ok(find_status(&statuses, &lookup))
    }
}
