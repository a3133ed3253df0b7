//! Axum router wiring.
//!
//! `/healthz` plus the scrape endpoint at the configured path.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route(state.metrics_path(), get(ops::metrics))
        .with_state(state)
}
