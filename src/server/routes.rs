/// Router definition

use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::core::HealthState;

/// Every method and path ends up in the health handler
pub fn create_router(state: HealthState) -> Router {
    Router::new()
        .fallback(handlers::health_status)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
