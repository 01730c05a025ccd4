//! Route table for the ledger API

use super::handlers::{
    AppState, create_account, create_transaction, get_account, liveliness, readiness,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Build the full application router
///
/// - POST /accounts - Register an account
/// - GET /accounts/{id} - Fetch an account
/// - POST /transactions - Post a ledger entry
/// - GET /status, GET /healthcheck/readiness - Store reachability
/// - GET /healthcheck/liveliness - Process is up
///
/// Every request is traced and bounded by `request_timeout`; a request that
/// runs past it is dropped and answered with 408.
pub fn build_routes(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(health_routes())
        .route("/accounts", post(create_account))
        .route("/accounts/{id}", get(get_account))
        .route("/transactions", post(create_transaction))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(readiness))
        .route("/healthcheck/readiness", get(readiness))
        .route("/healthcheck/liveliness", get(liveliness))
}
