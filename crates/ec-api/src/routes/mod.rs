//! API route definitions and router builder.

pub mod calculate;
pub mod factors;
pub mod health;
pub mod organization;
pub mod sessions;
pub mod translate;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Stateless accounting
        .route("/calculate", post(calculate::calculate))
        .route("/recommendations", post(calculate::recommendations))
        .route("/translate", post(translate::translate))
        // Catalog
        .route("/emission-factors", get(factors::list_factors))
        .route("/emission-factors/{key}", get(factors::get_factor))
        // Organizations
        .route("/organization/calculate", post(organization::calculate))
        .route("/organization/estimate", post(organization::estimate))
        // Intake sessions
        .route("/sessions", post(sessions::create_session))
        .route(
            "/sessions/{id}",
            get(sessions::get_session).delete(sessions::delete_session),
        )
        .route("/sessions/{id}/messages", post(sessions::post_message))
        .route("/sessions/{id}/question", get(sessions::get_question))
        .route("/sessions/{id}/calculate", post(sessions::calculate_session));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
