//! Route definitions for the gate.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::routing::{any, get};
use tower_http::trace::TraceLayer;

/// Create the gate router.
///
/// The embed endpoints are registered for any method: method filtering
/// happens inside the handlers so that preflights get their 204 and
/// disallowed methods get a JSON 405 with correct cross-origin headers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/embed/token", any(handlers::issue_token))
        .route("/embed/content", any(handlers::redeem_content))
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
