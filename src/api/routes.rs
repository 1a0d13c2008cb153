use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span, request_id};

use super::{handlers, pages, AppState};

/// Creates the main API router with all routes
///
/// Recommendation endpoints accept both GET and POST so parameters can come
/// from the query string or from a body.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // JSON recommendation endpoints
        .route(
            "/make_recommendations_by_id",
            get(handlers::recommendations_by_id).post(handlers::recommendations_by_id),
        )
        .route(
            "/make_recommendations_by_title",
            get(handlers::recommendations_by_title).post(handlers::recommendations_by_title),
        )
        // Rendered pages
        .route("/recommender", get(pages::recommender_form))
        .route("/results", post(pages::results))
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(from_fn(request_id))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
