pub mod errors;
pub mod input;
pub mod models;
pub mod services;
pub mod storage;

use log::{debug, info, warn};
use models::{
    chart::{PriceBar, TrendPoint},
    city::City,
    dashboard::DashboardState,
    field::{Field, FieldUpdate},
    metrics::DashboardMetrics,
    price::PriceChange,
    settings::DashboardConfig,
};
use services::{
    chart_service::ChartService, dashboard_service::DashboardService,
    metrics_service::MetricsService,
};
use storage::backend::KeyValueStore;
use storage::manager::StorageManager;
use uuid::Uuid;

use errors::CoreError;

/// Handle returned by [`HeartsDashboard::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&DashboardState)>;

/// Main entry point for the Hearts Dashboard core library.
/// Owns the dashboard state for one session, applies intents to it and
/// writes it back to storage after every committed change.
#[must_use]
pub struct HeartsDashboard<S: KeyValueStore> {
    state: DashboardState,
    config: DashboardConfig,
    store: S,
    dashboard_service: DashboardService,
    metrics_service: MetricsService,
    chart_service: ChartService,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    /// Saving is held back until the first load has finished, so the
    /// pre-load default can never overwrite a stored snapshot.
    loaded: bool,
    /// Tracks whether the in-memory state differs from what was last saved.
    dirty: bool,
}

impl<S: KeyValueStore> std::fmt::Debug for HeartsDashboard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeartsDashboard")
            .field("store", &self.store.name())
            .field("config", &self.config)
            .field("active_city_id", &self.state.active_city_id)
            .field("trips_completed", &self.state.trips_completed)
            .field("listeners", &self.listeners.len())
            .field("loaded", &self.loaded)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<S: KeyValueStore> HeartsDashboard<S> {
    /// Create a dashboard holding the default state. Nothing is read or
    /// written until [`load`](Self::load) is called.
    pub fn new(store: S, config: DashboardConfig) -> Self {
        Self {
            state: DashboardState::default(),
            config,
            store,
            dashboard_service: DashboardService::new(),
            metrics_service: MetricsService::new(),
            chart_service: ChartService::new(),
            listeners: Vec::new(),
            next_subscription: 0,
            loaded: false,
            dirty: false,
        }
    }

    /// Create a dashboard and immediately load the saved snapshot.
    pub fn open(store: S, config: DashboardConfig) -> Self {
        let mut dashboard = Self::new(store, config);
        dashboard.load();
        dashboard
    }

    /// Replace the in-memory state with the saved snapshot.
    /// A missing or unreadable snapshot yields the default state; the
    /// failure is logged, never returned.
    pub fn load(&mut self) -> &DashboardState {
        self.state = StorageManager::load_or_default(&self.store, &self.config.storage_key);
        self.loaded = true;
        self.dirty = false;
        info!(
            "Loaded dashboard from {} ({} trips, {} price log entries)",
            self.store.name(),
            self.state.trips_completed,
            self.state.history.len()
        );
        self.notify();
        &self.state
    }

    /// Returns `true` once the initial load has completed.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ── Intents ─────────────────────────────────────────────────────

    /// Set a market's price. Unknown market ids are ignored.
    pub fn update_city_price(&mut self, city_id: &str, price: u64) -> &DashboardState {
        let next = self
            .dashboard_service
            .update_city_price(&self.state, city_id, price);
        self.commit(next)
    }

    /// Set a market's price from raw input text; invalid text counts as 0.
    pub fn update_city_price_input(&mut self, city_id: &str, text: &str) -> &DashboardState {
        self.update_city_price(city_id, input::parse_amount(text))
    }

    pub fn set_active_city(&mut self, city_id: &str) -> &DashboardState {
        let next = self.dashboard_service.set_active_city(&self.state, city_id);
        self.commit(next)
    }

    pub fn update_field(&mut self, update: FieldUpdate) -> &DashboardState {
        let next = self.dashboard_service.update_field(&self.state, update);
        self.commit(next)
    }

    /// Set a scalar field from raw input text; invalid text counts as 0.
    pub fn update_field_input(&mut self, field: Field, text: &str) -> &DashboardState {
        self.update_field(field.with(input::parse_amount(text)))
    }

    /// Record the active market's price and the current heart target.
    pub fn add_history_entry(&mut self) -> &DashboardState {
        let next = self.dashboard_service.add_history_entry(&self.state);
        self.commit(next)
    }

    pub fn remove_history_entry(&mut self, entry_id: Uuid) -> &DashboardState {
        let next = self
            .dashboard_service
            .remove_history_entry(&self.state, entry_id);
        self.commit(next)
    }

    /// Log a completed trip and credit its hearts.
    /// Not blocked at 100%; check [`can_complete_trip`](Self::can_complete_trip) first
    /// to gate the action.
    pub fn complete_trip(&mut self) -> &DashboardState {
        let next = self.dashboard_service.complete_trip(&self.state);
        self.commit(next)
    }

    pub fn reset_progress(&mut self) -> &DashboardState {
        info!(
            "Resetting progress ({} hearts over {} trips)",
            self.state.current_hearts, self.state.trips_completed
        );
        let next = self.dashboard_service.reset_progress(&self.state);
        self.commit(next)
    }

    // ── Derived metrics ─────────────────────────────────────────────

    /// Every derived figure for the current state.
    #[must_use]
    pub fn metrics(&self) -> DashboardMetrics {
        self.metrics_service.summary(&self.state)
    }

    #[must_use]
    pub fn active_city(&self) -> Option<&City> {
        self.metrics_service.active_city(&self.state)
    }

    #[must_use]
    pub fn best_city(&self) -> Option<&City> {
        self.metrics_service.best_city(&self.state)
    }

    #[must_use]
    pub fn hearts_needed(&self) -> u64 {
        self.metrics_service.hearts_needed(&self.state)
    }

    #[must_use]
    pub fn hearts_remaining(&self) -> u64 {
        self.metrics_service.hearts_remaining(&self.state)
    }

    #[must_use]
    pub fn progress_percentage(&self) -> f64 {
        self.metrics_service.progress_percentage(&self.state)
    }

    #[must_use]
    pub fn current_value(&self) -> u64 {
        self.metrics_service.current_value(&self.state)
    }

    #[must_use]
    pub fn trips_remaining(&self) -> u64 {
        self.metrics_service.trips_remaining(&self.state)
    }

    #[must_use]
    pub fn profit_per_trip_base(&self) -> i64 {
        self.metrics_service.profit_per_trip_base(&self.state)
    }

    #[must_use]
    pub fn market_profit_per_trip(&self) -> i64 {
        self.metrics_service.market_profit_per_trip(&self.state)
    }

    #[must_use]
    pub fn market_profit_difference(&self) -> i64 {
        self.metrics_service.market_profit_difference(&self.state)
    }

    #[must_use]
    pub fn total_investment_made(&self) -> u64 {
        self.metrics_service.total_investment_made(&self.state)
    }

    #[must_use]
    pub fn total_capital_required(&self) -> u64 {
        self.metrics_service.total_capital_required(&self.state)
    }

    #[must_use]
    pub fn silver_value_remaining(&self) -> u64 {
        self.metrics_service.silver_value_remaining(&self.state)
    }

    /// Price movement of a market; unknown markets read as unchanged.
    #[must_use]
    pub fn price_change(&self, city_id: &str) -> PriceChange {
        self.state
            .city(city_id)
            .map_or(PriceChange::Unchanged, |c| self.metrics_service.price_change(c))
    }

    /// `false` once the heart target is reached.
    #[must_use]
    pub fn can_complete_trip(&self) -> bool {
        self.metrics_service.can_complete_trip(&self.state)
    }

    // ── Charts ──────────────────────────────────────────────────────

    #[must_use]
    pub fn price_bars(&self) -> Vec<PriceBar> {
        self.chart_service.price_bars(&self.state)
    }

    /// A market's prices oldest-first; empty for unknown markets.
    #[must_use]
    pub fn price_trend(&self, city_id: &str) -> Vec<TrendPoint> {
        self.state
            .city(city_id)
            .map(|c| self.chart_service.price_trend(c))
            .unwrap_or_default()
    }

    // ── Persistence ─────────────────────────────────────────────────

    /// Write the current state now. Refused before the initial load.
    /// Returns `true` if the snapshot was written.
    pub fn save(&mut self) -> bool {
        if !self.loaded {
            warn!("Refusing to save before the initial load has completed");
            return false;
        }
        self.persist()
    }

    /// Returns `true` if the state has changes that are not in storage.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// Delete the saved snapshot and start over from the default state.
    pub fn clear_storage(&mut self) -> Result<&DashboardState, CoreError> {
        StorageManager::clear(&mut self.store, &self.config.storage_key)?;
        info!("Cleared saved dashboard from {}", self.store.name());
        self.state = DashboardState::default();
        self.dirty = false;
        self.notify();
        Ok(&self.state)
    }

    /// The current state as pretty JSON (same shape as the snapshot).
    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize dashboard: {e}")))
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn into_storage(self) -> S {
        self.store
    }

    // ── Observers ───────────────────────────────────────────────────

    /// Call `listener` with the new state after every committed change.
    pub fn subscribe(&mut self, listener: impl FnMut(&DashboardState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    // ── Internal ────────────────────────────────────────────────────

    fn commit(&mut self, next: DashboardState) -> &DashboardState {
        if next == self.state {
            return &self.state;
        }
        self.state = next;
        self.dirty = true;

        if !self.loaded {
            debug!("Holding back save until the initial load completes");
        } else if self.config.autosave {
            self.persist();
        }

        self.notify();
        &self.state
    }

    fn persist(&mut self) -> bool {
        let saved =
            StorageManager::save_best_effort(&mut self.store, &self.config.storage_key, &self.state);
        if saved {
            self.dirty = false;
        }
        saved
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }
}
