use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::input::deserialize_amount;

/// Format used for the human-readable `date` of log entries (e.g., "07 Mar 14:05").
pub const LOG_DATE_FORMAT: &str = "%d %b %H:%M";

/// Render a log timestamp in the user's local time.
pub fn format_log_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(LOG_DATE_FORMAT).to_string()
}

/// A recorded snapshot of the target calculation at a given market.
///
/// Only created by the explicit "record" action; never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: Uuid,

    /// Human-readable creation time
    pub date: String,

    /// Name of the market that was active when recorded
    pub city: String,

    /// That market's price at the time
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: u64,

    /// Hearts needed for the target at the time
    #[serde(deserialize_with = "deserialize_amount")]
    pub hearts_needed: u64,
}

impl HistoryEntry {
    pub fn new(city: impl Into<String>, price: u64, hearts_needed: u64, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: format_log_date(at),
            city: city.into(),
            price,
            hearts_needed,
        }
    }
}

/// One completed trip. Created exactly once per trip and never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLogEntry {
    pub id: Uuid,

    /// Human-readable completion time
    pub date: String,

    /// Name of the market the trip was valued against
    pub city: String,

    /// Hearts gained on this trip
    #[serde(deserialize_with = "deserialize_amount")]
    pub hearts_earned: u64,

    /// Silver spent on this trip
    #[serde(deserialize_with = "deserialize_amount")]
    pub investment: u64,

    /// Market profit for the trip (may be negative)
    pub profit: i64,
}

impl TripLogEntry {
    pub fn new(
        city: impl Into<String>,
        hearts_earned: u64,
        investment: u64,
        profit: i64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: format_log_date(at),
            city: city.into(),
            hearts_earned,
            investment,
            profit,
        }
    }
}
