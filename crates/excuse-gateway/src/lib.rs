pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod generate;
pub mod handlers;
pub mod metrics;
pub mod prompt;
pub mod state;
pub mod ui;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{debug_info, generate_excuse, healthz};
use crate::metrics::{metrics_handler, track_requests};
use crate::state::AppState;

pub fn router(st: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index))
        .route("/api/generate-excuse", post(generate_excuse))
        .route("/health", get(healthz))
        .route("/healthz", get(healthz))
        .route("/ready", get(healthz))
        .route("/ping", get(healthz))
        .route("/metrics", get(metrics_handler))
        .route("/debug", get(debug_info))
        .layer(middleware::from_fn_with_state(st.clone(), track_requests))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(st)
}
