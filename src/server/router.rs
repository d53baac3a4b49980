//! Router builder for the API routes

use crate::server::handlers::{
    create_hero_power, get_hero, get_power, index, list_heroes, list_powers, update_power,
    AppState,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router
///
/// Routes:
/// - GET /                  - Index page
/// - GET /heroes            - List hero summaries
/// - GET /heroes/{id}       - Get a hero with its nested powers
/// - GET /powers            - List power summaries
/// - GET /powers/{id}       - Get a power
/// - PATCH /powers/{id}     - Partially update a power
/// - POST /hero_powers      - Create a hero/power association
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/heroes", get(list_heroes))
        .route("/heroes/{id}", get(get_hero))
        .route("/powers", get(list_powers))
        .route("/powers/{id}", get(get_power).patch(update_power))
        .route("/hero_powers", post(create_hero_power))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
