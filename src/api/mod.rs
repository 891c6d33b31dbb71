pub mod health;
pub mod price_history;
pub mod valuations;

use crate::config::Config;
use crate::db::Repository;
use crate::engine::ValuationEngine;
use crate::notify::Notifier;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub engine: ValuationEngine,
    pub notifier: Arc<dyn Notifier>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        repo: Arc<Repository>,
        engine: ValuationEngine,
        notifier: Arc<dyn Notifier>,
        config: Config,
    ) -> Self {
        Self {
            repo,
            engine,
            notifier,
            config,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/valuations", post(valuations::create_valuation))
        .route("/v1/valuations/:token", get(valuations::get_valuation))
        .route(
            "/v1/valuations/:token/report",
            get(valuations::get_valuation_report),
        )
        .route(
            "/v1/properties/:id/price-changes",
            post(price_history::create_price_change),
        )
        .route(
            "/v1/properties/:id/price-history",
            get(price_history::get_price_history),
        )
        .route(
            "/v1/properties/:id/price-at",
            get(price_history::get_price_at),
        )
        .layer(cors)
        .with_state(state)
}
