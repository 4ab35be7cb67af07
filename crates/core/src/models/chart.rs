use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bar of the market comparison chart.
///
/// The core decides what is highlighted; the frontend just renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub city_id: String,

    /// Compact label (first word of the market name)
    pub name: String,

    pub full_name: String,

    pub price: u64,

    /// This market currently has the highest price
    pub is_best: bool,

    /// This market is the selected one
    pub is_active: bool,
}

/// One point of a single market's price trend, oldest-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub price: u64,

    /// When this price was superseded; `None` for the current price
    pub until: Option<DateTime<Utc>>,
}
