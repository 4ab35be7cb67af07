use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::input::deserialize_amount;

use super::price::{PriceChange, PriceHistoryEntry};
use super::retention::{prepend_bounded, PRICE_HISTORY_LIMIT};

/// The six royal-city markets, in display order.
/// `(id, name, suggested price)`
pub const DEFAULT_MARKETS: [(&str, &str, u64); 6] = [
    ("fort-sterling", "Fort Sterling", 35_000),
    ("thetford", "Thetford", 46_000),
    ("martlock", "Martlock", 44_000),
    ("caerleon", "Caerleon", 49_000),
    ("bridgewatch", "Bridgewatch", 44_000),
    ("lymhurst", "Lymhurst", 43_000),
];

/// Market selected when nothing else has been chosen.
pub const DEFAULT_ACTIVE_CITY: &str = "caerleon";

/// One regional market and the prices observed there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    /// Stable identifier (e.g., "fort-sterling"). Never changes.
    pub id: String,

    /// Display label (e.g., "Fort Sterling")
    pub name: String,

    /// Current unit price in silver
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub price: u64,

    /// Previous prices, most-recent-first, at most 20
    #[serde(default)]
    pub price_history: Vec<PriceHistoryEntry>,

    /// Hint shown while no price has been entered
    #[serde(default)]
    pub suggested_price: Option<u64>,
}

impl City {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: 0,
            price_history: Vec::new(),
            suggested_price: None,
        }
    }

    pub fn with_suggested_price(mut self, price: u64) -> Self {
        self.suggested_price = Some(price);
        self
    }

    /// Replace the current price, keeping the old one in history.
    pub fn record_price(&mut self, new_price: u64, at: DateTime<Utc>) {
        prepend_bounded(
            &mut self.price_history,
            PriceHistoryEntry::new(self.price, at),
            PRICE_HISTORY_LIMIT,
        );
        self.price = new_price;
    }

    /// The price this city had before its latest update, if any.
    pub fn previous_price(&self) -> Option<u64> {
        self.price_history.first().map(|e| e.price)
    }

    /// How the current price compares to the previous one.
    pub fn price_change(&self) -> PriceChange {
        PriceChange::between(self.previous_price(), self.price)
    }

    /// First word of the name, used as a compact chart label.
    pub fn short_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// The fixed market list every dashboard starts with.
pub fn default_cities() -> Vec<City> {
    DEFAULT_MARKETS
        .iter()
        .map(|(id, name, hint)| City::new(*id, *name).with_suggested_price(*hint))
        .collect()
}
