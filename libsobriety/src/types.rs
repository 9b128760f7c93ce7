//! Core data types for the sobriety tracker

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Default rendering for relapse dates, e.g. `1/1/2020`
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Root state held by the store
///
/// Always fully populated. Instances are never mutated after being
/// installed in a [`Store`](crate::Store); the reducer builds a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SobrietyState {
    /// Start of the current sober streak, if one has been set
    pub time_sober: Option<DateTime<Utc>>,

    /// Relapse log, oldest first. Append-only.
    pub relapses: Vec<RelapseRecord>,
}

impl SobrietyState {
    /// The state every store starts from: no anchor, no relapses
    pub fn initial() -> Self {
        Self {
            time_sober: None,
            relapses: Vec::new(),
        }
    }
}

impl Default for SobrietyState {
    fn default() -> Self {
        Self::initial()
    }
}

/// A single logged relapse
///
/// `time` is free-form. Whatever the caller supplies is stored as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelapseRecord {
    pub time: String,
}

impl RelapseRecord {
    pub fn new(time: impl Into<String>) -> Self {
        Self { time: time.into() }
    }

    /// Render `date` with a strftime-style `format`
    ///
    /// Falls back to ISO 8601 (`YYYY-MM-DD`) if the format string contains
    /// an unsupported specifier.
    pub fn on_date(date: NaiveDate, format: &str) -> Self {
        let mut time = String::new();
        if write!(time, "{}", date.format(format)).is_err() {
            time = date.format("%Y-%m-%d").to_string();
        }
        Self { time }
    }
}
