pub mod chart_service;
pub mod dashboard_service;
pub mod metrics_service;
