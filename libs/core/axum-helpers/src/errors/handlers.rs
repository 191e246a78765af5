use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");
    let body = Json(ErrorResponse::new(format!("No route for {}", uri.path())));

    (StatusCode::NOT_FOUND, body).into_response()
}
