use chrono::{DateTime, Utc};
use log::debug;
use uuid::Uuid;

use crate::models::dashboard::DashboardState;
use crate::models::field::FieldUpdate;
use crate::models::history::{HistoryEntry, TripLogEntry};
use crate::models::retention::{prepend_bounded, PRICE_LOG_LIMIT, TRIP_LOG_LIMIT};
use crate::services::metrics_service::MetricsService;

/// State transitions for the dashboard.
///
/// Every operation takes the current state by reference and returns the
/// next one; the input is never touched. Operations are total: unknown ids
/// are no-ops and amounts arrive already sanitized (see [`crate::input`]).
pub struct DashboardService {
    metrics: MetricsService,
}

impl DashboardService {
    pub fn new() -> Self {
        Self {
            metrics: MetricsService::new(),
        }
    }

    /// Set a market's price, pushing the old price onto its history.
    pub fn update_city_price(&self, state: &DashboardState, city_id: &str, new_price: u64) -> DashboardState {
        self.update_city_price_at(state, city_id, new_price, Utc::now())
    }

    pub fn update_city_price_at(
        &self,
        state: &DashboardState,
        city_id: &str,
        new_price: u64,
        at: DateTime<Utc>,
    ) -> DashboardState {
        let mut next = state.clone();
        match next.city_mut(city_id) {
            Some(city) => city.record_price(new_price, at),
            None => debug!("Ignoring price update for unknown city '{city_id}'"),
        }
        next
    }

    /// Select a market. The id is not validated here; readers fall back
    /// to the first market if it does not resolve.
    pub fn set_active_city(&self, state: &DashboardState, city_id: &str) -> DashboardState {
        let mut next = state.clone();
        next.active_city_id = city_id.to_string();
        next
    }

    pub fn update_field(&self, state: &DashboardState, update: FieldUpdate) -> DashboardState {
        let mut next = state.clone();
        match update {
            FieldUpdate::TargetAmount(v) => next.target_amount = v,
            FieldUpdate::CurrentHearts(v) => next.current_hearts = v,
            FieldUpdate::PricePerUnit(v) => next.price_per_unit = v,
            FieldUpdate::HeartsPerTrip(v) => next.hearts_per_trip = v,
            FieldUpdate::InvestmentPerTrip(v) => next.investment_per_trip = v,
        }
        next
    }

    /// Record the active market's price and the current heart target in the price log.
    pub fn add_history_entry(&self, state: &DashboardState) -> DashboardState {
        self.add_history_entry_at(state, Utc::now())
    }

    pub fn add_history_entry_at(&self, state: &DashboardState, at: DateTime<Utc>) -> DashboardState {
        let (city, price) = self
            .metrics
            .active_city(state)
            .map(|c| (c.name.clone(), c.price))
            .unwrap_or_default();
        let entry = HistoryEntry::new(city, price, self.metrics.hearts_needed(state), at);

        let mut next = state.clone();
        prepend_bounded(&mut next.history, entry, PRICE_LOG_LIMIT);
        next
    }

    pub fn remove_history_entry(&self, state: &DashboardState, entry_id: Uuid) -> DashboardState {
        let mut next = state.clone();
        next.history.retain(|e| e.id != entry_id);
        if next.history.len() == state.history.len() {
            debug!("Ignoring removal of unknown history entry {entry_id}");
        }
        next
    }

    /// Log a finished trip and credit its hearts.
    ///
    /// Does not stop at 100% progress; callers that want that gate use
    /// [`MetricsService::can_complete_trip`].
    pub fn complete_trip(&self, state: &DashboardState) -> DashboardState {
        self.complete_trip_at(state, Utc::now())
    }

    pub fn complete_trip_at(&self, state: &DashboardState, at: DateTime<Utc>) -> DashboardState {
        let city = self
            .metrics
            .active_city(state)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let entry = TripLogEntry::new(
            city,
            state.hearts_per_trip,
            state.investment_per_trip,
            self.metrics.market_profit_per_trip(state),
            at,
        );

        let mut next = state.clone();
        prepend_bounded(&mut next.trip_log, entry, TRIP_LOG_LIMIT);
        next.current_hearts = next.current_hearts.saturating_add(state.hearts_per_trip);
        next.trips_completed = next.trips_completed.saturating_add(1);
        next
    }

    /// Start progress over. Targets, prices and the price log are kept.
    pub fn reset_progress(&self, state: &DashboardState) -> DashboardState {
        let mut next = state.clone();
        next.current_hearts = 0;
        next.trips_completed = 0;
        next.trip_log.clear();
        next
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}
