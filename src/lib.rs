//! Pricing service for Paris airport transfers, tours and events.
//!
//! Exposes the transfer tariff, night-time classification, deposit
//! calculations and WhatsApp follow-up links over HTTP/JSON.

pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;
pub mod whatsapp;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use config::Config;
use pricing::{QuoteSettings, TariffTable};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tariff: &'static TariffTable,
    pub quotes: Arc<QuoteSettings>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            quotes: Arc::new(config.quote_settings()),
            config: Arc::new(config),
            tariff: TariffTable::standard(),
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(routes::health))
        .nest("/api/pricing", pricing::router())
        .route("/api/whatsapp/link", post(routes::whatsapp::link))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http());

    if state.config.cors_allow_any {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}
