//! Operational HTTP endpoints.
//!
//! - `/healthz`           : liveness
//! - `<endpoint>/metrics` : Prometheus text format, streamed line by line

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::stream;

use promtext_core::exposition::CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    // A client that disconnects drops the body, which stops the iterator.
    let lines = state.scrape().map(Ok::<_, Infallible>);
    let body = Body::from_stream(stream::iter(lines));

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}
