use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Read routes consumed by the browsing front end
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/users/active", get(handlers::active_users))
        .route("/recommend/popular", get(handlers::popular_books))
        .route("/recommend/content/:isbn", get(handlers::content_recommendations))
        .route("/recommend/hybrid/:user_id", get(handlers::hybrid_recommendations))
        .route("/book/:isbn", get(handlers::book_by_isbn))
}
