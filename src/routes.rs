use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;
use crate::state::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Playground page
        .route("/play", get(handlers::playground))
        // Health check
        .route("/health", get(handlers::health_check))
        // Available translation providers
        .route("/providers", get(handlers::list_providers))
        // Single translation, query params or JSON body
        .route(
            "/translate",
            get(handlers::translate_query).post(handlers::translate_json),
        )
        // Batch translation
        .route("/batch_translate", post(handlers::batch_translate))
}
