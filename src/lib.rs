// Library exports for binary tools and tests
pub mod config;
pub mod cors;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use config::Config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// All routes, without CORS (added by the server binary).
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Schedules
        .route("/schedules/default", get(routes::schedules::default_schedule))
        .route("/schedules/working-day", post(routes::schedules::working_day))
        .route("/schedules/conflicts", post(routes::schedules::conflicts))
        .route("/schedules/off-days", post(routes::schedules::set_weekly_off_day))
        .route("/schedules/leaves/toggle", post(routes::schedules::toggle_leave))
        .route("/schedules/holidays/toggle", post(routes::schedules::toggle_holiday))
        .route("/schedules/hours", post(routes::schedules::set_working_hours))
        .route("/schedules/working-flag", post(routes::schedules::set_working_flag))
        .route("/schedules/month", post(routes::schedules::month_overview))
        // Staff
        .route("/staff/draft", post(routes::staff::draft_staff))
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
