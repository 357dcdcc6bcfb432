use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    middleware::request_id::RequestId,
    models::UserId,
    services::Resolved,
};

use super::AppState;

/// Response header naming the attempt (or `substitute`) that answered
pub const RESOLUTION_SOURCE_HEADER: &str = "x-resolution-source";

/// Every resolution route answers 200, whichever source won
fn resolved_response<T: Serialize>(resolved: Resolved<T>) -> Response {
    (
        [(RESOLUTION_SOURCE_HEADER, resolved.source.label())],
        Json(resolved.value),
    )
        .into_response()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// List users the front end can act as
pub async fn active_users(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    let resolved = state.gateway.list_active_users().await;

    tracing::info!(
        request_id = %request_id,
        source = %resolved.source,
        users = resolved.value.len(),
        "Resolved active users"
    );

    resolved_response(resolved)
}

pub async fn popular_books(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Response {
    let resolved = state.gateway.popular_books().await;

    tracing::info!(
        request_id = %request_id,
        source = %resolved.source,
        books = resolved.value.len(),
        "Resolved popular books"
    );

    resolved_response(resolved)
}

pub async fn content_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(isbn): Path<String>,
) -> Response {
    let resolved = state.gateway.content_recommendations(&isbn).await;

    tracing::info!(
        request_id = %request_id,
        isbn = %isbn,
        source = %resolved.source,
        books = resolved.value.len(),
        "Resolved content recommendations"
    );

    resolved_response(resolved)
}

pub async fn hybrid_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = UserId::from(user_id);
    let resolved = state.gateway.hybrid_recommendations(&user_id).await;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        source = %resolved.source,
        books = resolved.value.len(),
        "Resolved hybrid recommendations"
    );

    resolved_response(resolved)
}

/// Single book detail, never a 404
pub async fn book_by_isbn(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(isbn): Path<String>,
) -> Response {
    let resolved = state.gateway.resolve_book_by_isbn(&isbn).await;

    tracing::info!(
        request_id = %request_id,
        isbn = %isbn,
        source = %resolved.source,
        "Resolved book"
    );

    resolved_response(resolved)
}
