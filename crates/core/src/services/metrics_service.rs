use crate::models::city::City;
use crate::models::dashboard::DashboardState;
use crate::models::metrics::DashboardMetrics;
use crate::models::price::PriceChange;

/// Computes every derived dashboard figure from the current state.
///
/// Pure functions of the state: nothing is cached, so a read after any
/// mutation always reflects it. Zero denominators yield 0.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    /// The selected market, falling back to the first market.
    pub fn active_city<'a>(&self, state: &'a DashboardState) -> Option<&'a City> {
        state.active_city()
    }

    /// The highest-priced market. Ties go to the earliest market in display order.
    pub fn best_city<'a>(&self, state: &'a DashboardState) -> Option<&'a City> {
        state.cities.iter().fold(None, |best, city| match best {
            Some(b) if b.price >= city.price => Some(b),
            _ => Some(city),
        })
    }

    pub fn hearts_needed(&self, state: &DashboardState) -> u64 {
        if state.price_per_unit == 0 {
            return 0;
        }
        state.target_amount.div_ceil(state.price_per_unit)
    }

    pub fn hearts_remaining(&self, state: &DashboardState) -> u64 {
        self.hearts_needed(state).saturating_sub(state.current_hearts)
    }

    /// Progress toward the heart target, clamped to [0, 100].
    pub fn progress_percentage(&self, state: &DashboardState) -> f64 {
        let needed = self.hearts_needed(state);
        if needed == 0 {
            return 0.0;
        }
        (100.0 * state.current_hearts as f64 / needed as f64).min(100.0)
    }

    pub fn current_value(&self, state: &DashboardState) -> u64 {
        state.current_hearts.saturating_mul(state.price_per_unit)
    }

    pub fn trips_remaining(&self, state: &DashboardState) -> u64 {
        if state.hearts_per_trip == 0 {
            return 0;
        }
        self.hearts_remaining(state).div_ceil(state.hearts_per_trip)
    }

    pub fn profit_per_trip_base(&self, state: &DashboardState) -> i64 {
        trip_profit(state.price_per_unit, state.hearts_per_trip, state.investment_per_trip)
    }

    /// Profit per trip when selling at the active market's price.
    pub fn market_profit_per_trip(&self, state: &DashboardState) -> i64 {
        let price = self.active_city(state).map_or(0, |c| c.price);
        trip_profit(price, state.hearts_per_trip, state.investment_per_trip)
    }

    pub fn market_profit_difference(&self, state: &DashboardState) -> i64 {
        let diff = i128::from(self.market_profit_per_trip(state))
            - i128::from(self.profit_per_trip_base(state));
        clamp_i64(diff)
    }

    pub fn total_investment_made(&self, state: &DashboardState) -> u64 {
        state.trips_completed.saturating_mul(state.investment_per_trip)
    }

    pub fn total_capital_required(&self, state: &DashboardState) -> u64 {
        self.trips_remaining(state)
            .saturating_mul(state.investment_per_trip)
    }

    pub fn silver_value_remaining(&self, state: &DashboardState) -> u64 {
        self.hearts_remaining(state)
            .saturating_mul(state.price_per_unit)
    }

    /// How a market's price moved since its previous recorded price.
    pub fn price_change(&self, city: &City) -> PriceChange {
        city.price_change()
    }

    /// `true` while the heart target has not been reached.
    /// Completing a trip is still valid past 100%; this is only a UI gate.
    pub fn can_complete_trip(&self, state: &DashboardState) -> bool {
        self.progress_percentage(state) < 100.0
    }

    /// All derived figures in one snapshot.
    pub fn summary(&self, state: &DashboardState) -> DashboardMetrics {
        DashboardMetrics {
            active_city_id: self
                .active_city(state)
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            best_city_id: self
                .best_city(state)
                .map(|c| c.id.clone())
                .unwrap_or_default(),
            hearts_needed: self.hearts_needed(state),
            hearts_remaining: self.hearts_remaining(state),
            progress_percentage: self.progress_percentage(state),
            current_value: self.current_value(state),
            trips_remaining: self.trips_remaining(state),
            profit_per_trip_base: self.profit_per_trip_base(state),
            market_profit_per_trip: self.market_profit_per_trip(state),
            market_profit_difference: self.market_profit_difference(state),
            total_investment_made: self.total_investment_made(state),
            total_capital_required: self.total_capital_required(state),
            silver_value_remaining: self.silver_value_remaining(state),
        }
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}

/// `price * hearts - investment`, computed wide and clamped back to i64.
/// `u64::MAX * u64::MAX` does not fit in i128, so the wide math saturates too.
fn trip_profit(price: u64, hearts: u64, investment: u64) -> i64 {
    let gross = i128::from(price).saturating_mul(i128::from(hearts));
    clamp_i64(gross.saturating_sub(i128::from(investment)))
}

fn clamp_i64(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
