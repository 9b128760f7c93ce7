//! Messages describing intended state changes
//!
//! Actions are plain data. They are produced by the constructors below (or
//! deserialized from `{"type": ..., "payload": ...}` JSON) and applied to
//! state by [`reduce`](crate::reduce).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::RelapseRecord;

pub const ADD_RELAPSE_DATE: &str = "ADD_RELAPSE_DATE";
pub const UPDATE_TIME_SOBER: &str = "UPDATE_TIME_SOBER";

/// Tagged message accepted by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// Log a relapse and restart the streak
    #[serde(rename = "ADD_RELAPSE_DATE")]
    AddRelapse { payload: RelapseRecord },

    /// Move the sober-since anchor
    #[serde(rename = "UPDATE_TIME_SOBER")]
    UpdateTimeSober {
        #[serde(deserialize_with = "deserialize_timestamp")]
        payload: DateTime<Utc>,
    },

    /// Any tag this build does not understand
    #[serde(rename = "UNKNOWN", other)]
    Unknown,
}

impl Action {
    /// Wire tag for this action
    pub fn tag(&self) -> &'static str {
        match self {
            Action::AddRelapse { .. } => ADD_RELAPSE_DATE,
            Action::UpdateTimeSober { .. } => UPDATE_TIME_SOBER,
            Action::Unknown => "UNKNOWN",
        }
    }
}

/// Build an [`Action::AddRelapse`] message
pub fn add_relapse(payload: RelapseRecord) -> Action {
    Action::AddRelapse { payload }
}

/// Build an [`Action::UpdateTimeSober`] message
pub fn update_time_sober(payload: DateTime<Utc>) -> Action {
    Action::UpdateTimeSober { payload }
}

/// Accepts RFC 3339 (`2020-01-02T00:00:00Z`) as well as the RFC 2822 form
/// browsers emit from `toUTCString()` (`Thu, 02 Jan 2020 00:00:00 GMT`).
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .or_else(|_| DateTime::parse_from_rfc2822(&raw))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid timestamp '{}': expected RFC 3339 or RFC 2822",
                raw
            ))
        })
}
