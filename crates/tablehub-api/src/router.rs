//! Route definitions for the TableHub HTTP API.
//!
//! All routes are organized by audience and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::timeout::TimeoutLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Reservation bodies are small JSON documents.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Build the complete Axum router with all routes and route-level middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(reservation_routes())
        .merge(admin_routes(&state))
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Guest endpoints: book, list, view, edit, and cancel own reservations
fn reservation_routes() -> Router<AppState> {
    use handlers::reservation as h;

    Router::new()
        .route("/reservations", post(h::create_reservation))
        .route("/reservations/my", get(h::list_my_reservations))
        .route(
            "/reservations/number/{number}",
            get(h::get_my_reservation_by_number),
        )
        .route(
            "/reservations/available-tables/{restaurant_id}",
            get(h::list_available_tables),
        )
        .route(
            "/reservations/{id}",
            get(h::get_my_reservation)
                .put(h::update_my_reservation)
                .delete(h::cancel_my_reservation),
        )
}

/// Staff endpoints, guarded by role
fn admin_routes(state: &AppState) -> Router<AppState> {
    use handlers::admin::reservations as h;

    Router::new()
        .route("/admin/reservations", get(h::list_reservations))
        .route(
            "/admin/reservations/stats/summary",
            get(h::reservation_stats),
        )
        .route(
            "/admin/reservations/number/{number}",
            get(h::get_reservation_by_number),
        )
        .route(
            "/admin/reservations/{id}",
            get(h::get_reservation)
                .put(h::update_reservation)
                .delete(h::cancel_reservation),
        )
        .route(
            "/admin/reservations/{id}/purge",
            delete(h::purge_reservation),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rbac::require_staff,
        ))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
