use serde::{Deserialize, Serialize};

use crate::input::deserialize_amount;

use super::city::{default_cities, City, DEFAULT_ACTIVE_CITY};
use super::history::{HistoryEntry, TripLogEntry};
use super::retention::{enforce_limit, PRICE_HISTORY_LIMIT, PRICE_LOG_LIMIT, TRIP_LOG_LIMIT};

/// The single source of truth for a dashboard session.
/// Everything in here gets serialized and written to storage after each change.
///
/// Contains the user's goal and trip parameters, the six markets with their
/// price history, the recorded price log and the trip log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    /// Silver goal
    #[serde(deserialize_with = "deserialize_amount")]
    pub target_amount: u64,

    /// Hearts already accumulated
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_hearts: u64,

    /// Reference price per heart used for baseline math
    #[serde(deserialize_with = "deserialize_amount")]
    pub price_per_unit: u64,

    /// Hearts gained per completed trip
    #[serde(deserialize_with = "deserialize_amount")]
    pub hearts_per_trip: u64,

    /// Silver spent per trip
    #[serde(deserialize_with = "deserialize_amount")]
    pub investment_per_trip: u64,

    /// Selected market; may dangle, readers fall back to the first city
    pub active_city_id: String,

    /// Number of trips completed since the last reset
    #[serde(deserialize_with = "deserialize_amount")]
    pub trips_completed: u64,

    /// The fixed market list, in display order
    pub cities: Vec<City>,

    /// Recorded price log, most-recent-first, at most 15
    pub history: Vec<HistoryEntry>,

    /// Completed trips, most-recent-first, at most 50
    pub trip_log: Vec<TripLogEntry>,

    /// Top-level fields this version does not know about.
    /// Kept so that a save does not drop data written by a newer version.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            target_amount: 0,
            current_hearts: 0,
            price_per_unit: 0,
            hearts_per_trip: 0,
            investment_per_trip: 0,
            active_city_id: DEFAULT_ACTIVE_CITY.to_string(),
            trips_completed: 0,
            cities: default_cities(),
            history: Vec::new(),
            trip_log: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }
}

impl DashboardState {
    pub fn city(&self, city_id: &str) -> Option<&City> {
        self.cities.iter().find(|c| c.id == city_id)
    }

    pub fn city_mut(&mut self, city_id: &str) -> Option<&mut City> {
        self.cities.iter_mut().find(|c| c.id == city_id)
    }

    /// The selected market, or the first market if the selection dangles.
    pub fn active_city(&self) -> Option<&City> {
        self.city(&self.active_city_id).or_else(|| self.cities.first())
    }

    /// Bring a loaded state back in line with the model's invariants:
    /// the six fixed markets in fixed order and every log within its bound.
    ///
    /// Stored data for known markets is kept; missing markets are restored
    /// from defaults and unknown ones are dropped.
    /// Returns `true` if anything had to change.
    pub fn normalize(&mut self) -> bool {
        let mut stored = std::mem::take(&mut self.cities);
        let stored_ids: Vec<String> = stored.iter().map(|c| c.id.clone()).collect();

        let reconciled: Vec<City> = default_cities()
            .into_iter()
            .map(|default| match stored.iter().position(|c| c.id == default.id) {
                Some(idx) => {
                    let mut city = stored.swap_remove(idx);
                    if city.suggested_price.is_none() {
                        city.suggested_price = default.suggested_price;
                    }
                    city
                }
                None => default,
            })
            .collect();

        let mut changed = reconciled
            .iter()
            .map(|c| c.id.as_str())
            .ne(stored_ids.iter().map(String::as_str));
        self.cities = reconciled;

        for city in &mut self.cities {
            changed |= enforce_limit(&mut city.price_history, PRICE_HISTORY_LIMIT) > 0;
        }
        changed |= enforce_limit(&mut self.history, PRICE_LOG_LIMIT) > 0;
        changed |= enforce_limit(&mut self.trip_log, TRIP_LOG_LIMIT) > 0;

        changed
    }
}
