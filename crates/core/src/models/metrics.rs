use serde::{Deserialize, Serialize};

/// Every derived dashboard figure at one point in time.
///
/// Computed from the state on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Id of the market used for "current market" figures
    pub active_city_id: String,

    /// Id of the highest-priced market
    pub best_city_id: String,

    /// ceil(target / price per unit)
    pub hearts_needed: u64,

    /// Hearts still missing toward the target
    pub hearts_remaining: u64,

    /// Progress toward `hearts_needed`, in [0, 100]
    pub progress_percentage: f64,

    /// Accumulated hearts valued at the reference price
    pub current_value: u64,

    /// Trips still needed at the configured hearts per trip
    pub trips_remaining: u64,

    /// Profit per trip at the reference price
    pub profit_per_trip_base: i64,

    /// Profit per trip at the active market's price
    pub market_profit_per_trip: i64,

    /// Market profit minus baseline profit
    pub market_profit_difference: i64,

    /// Silver invested in completed trips
    pub total_investment_made: u64,

    /// Silver needed to fund the remaining trips
    pub total_capital_required: u64,

    /// Remaining hearts valued at the reference price
    pub silver_value_remaining: u64,
}
