use crate::models::chart::{PriceBar, TrendPoint};
use crate::models::city::City;
use crate::models::dashboard::DashboardState;
use crate::services::metrics_service::MetricsService;

/// Generates chart-ready data sets from the dashboard state.
///
/// The core computes all the numbers; the frontend only renders.
pub struct ChartService {
    metrics: MetricsService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            metrics: MetricsService::new(),
        }
    }

    /// One bar per market in display order, flagging the best and the active market.
    pub fn price_bars(&self, state: &DashboardState) -> Vec<PriceBar> {
        let best_id = self.metrics.best_city(state).map(|c| c.id.as_str());
        let active_id = self.metrics.active_city(state).map(|c| c.id.as_str());

        state
            .cities
            .iter()
            .map(|city| PriceBar {
                city_id: city.id.clone(),
                name: city.short_name().to_string(),
                full_name: city.name.clone(),
                price: city.price,
                is_best: Some(city.id.as_str()) == best_id,
                is_active: Some(city.id.as_str()) == active_id,
            })
            .collect()
    }

    /// A market's prices oldest-first, ending with the current price.
    pub fn price_trend(&self, city: &City) -> Vec<TrendPoint> {
        city.price_history
            .iter()
            .rev()
            .map(|e| TrendPoint {
                price: e.price,
                until: Some(e.timestamp),
            })
            .chain(std::iter::once(TrendPoint {
                price: city.price,
                until: None,
            }))
            .collect()
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
