pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::keywords;
use crate::personas;
use crate::planning;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Keywords API
        .route(
            "/keywords",
            get(keywords::handlers::handle_list).post(keywords::handlers::handle_create),
        )
        .route("/keywords/:id", delete(keywords::handlers::handle_delete))
        // Personas API
        .route(
            "/personas",
            get(personas::handlers::handle_list).post(personas::handlers::handle_create),
        )
        .route("/personas/:id", delete(personas::handlers::handle_delete))
        // Planning API
        .route(
            "/planning/calendars",
            get(planning::handlers::handle_list_calendars),
        )
        .route(
            "/planning/generate-week",
            post(planning::handlers::handle_generate_week),
        )
        .with_state(state)
}
