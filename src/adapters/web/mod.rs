//! Web dashboard adapter.
//!
//! Axum server with an HTMX front end for running an analysis from the
//! browser and viewing the resulting signal report.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::cli::AnalysisSettings;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::sentiment_port::SentimentPort;
use crate::ports::store_port::StorePort;

pub struct AppState {
    pub market_port: Arc<dyn MarketDataPort + Send + Sync>,
    pub sentiment_port: Arc<dyn SentimentPort + Send + Sync>,
    pub store: Arc<dyn StorePort + Send + Sync>,
    pub settings: AnalysisSettings,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/analyze", post(handlers::run_analysis))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
