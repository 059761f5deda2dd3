pub mod health;

use axum::{routing::get, Router};

use crate::flows::handlers::flow_routes;
use crate::profiles::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Flow API
        .merge(flow_routes())
        // Profile API
        .route(
            "/api/v1/profiles/:user_id",
            get(handlers::handle_get_profile).put(handlers::handle_put_profile),
        )
        .with_state(state)
}
