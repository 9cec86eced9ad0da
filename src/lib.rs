pub mod coerce;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod models;
pub mod query;
pub mod routes;
pub mod state;
pub mod upstream;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::state::{AppState, SharedState};
use crate::upstream::SubmissionSource;

pub fn build_app(source: Arc<dyn SubmissionSource>) -> Router {
    let state: SharedState = Arc::new(AppState { source });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
