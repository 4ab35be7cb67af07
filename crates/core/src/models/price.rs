use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::deserialize_amount;

/// A city's price as it was just before an update replaced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistoryEntry {
    /// The superseded price, in silver
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: u64,

    /// When the superseding update happened
    pub timestamp: DateTime<Utc>,
}

impl PriceHistoryEntry {
    pub fn new(price: u64, timestamp: DateTime<Utc>) -> Self {
        Self { price, timestamp }
    }
}

/// Direction of a price movement relative to the previous price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceDirection {
    Up,
    Down,
}

impl std::fmt::Display for PriceDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceDirection::Up => write!(f, "up"),
            PriceDirection::Down => write!(f, "down"),
        }
    }
}

/// Result of comparing a city's current price to its last recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PriceChange {
    /// No history yet, or the price did not move
    Unchanged,

    /// The price moved by `magnitude` silver in `direction`
    Moved {
        direction: PriceDirection,
        magnitude: u64,
    },
}

impl PriceChange {
    /// Compare `current` against `previous` (if any).
    pub fn between(previous: Option<u64>, current: u64) -> Self {
        match previous {
            Some(prev) if current > prev => PriceChange::Moved {
                direction: PriceDirection::Up,
                magnitude: current - prev,
            },
            Some(prev) if current < prev => PriceChange::Moved {
                direction: PriceDirection::Down,
                magnitude: prev - current,
            },
            _ => PriceChange::Unchanged,
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, PriceChange::Unchanged)
    }
}
