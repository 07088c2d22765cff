//! Axum app: shared state and router.

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use super::handlers;
use crate::assistant::ChatRelay;
use crate::market::PriceQuery;

/// Shared, read-only state handed to every request.
pub struct AppState {
    /// `None` when the dataset API key is missing; price routes then report it.
    pub price_query: Option<Arc<PriceQuery>>,
    pub assistant: Arc<dyn ChatRelay>,
}

pub(crate) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/market_price", get(handlers::market_price))
        .route("/market_online", get(handlers::market_online))
        .route("/market", get(handlers::sample_market))
        .route("/reference", get(handlers::reference_tables))
        .route("/get_advice", post(handlers::get_advice))
        .with_state(state)
}
