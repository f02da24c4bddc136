//! Authentication middleware for API key validation

use super::AppState;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Authentication middleware
///
/// If `api_key` is configured in AppState, validates the Authorization header.
/// Expected format: `Authorization: Bearer <api_key>`
///
/// If no `api_key` is configured, all requests are allowed (local mode).
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected_key) = &state.api_key else {
        return next.run(request).await;
    };

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let rejection = match auth_header.map(|h| h.strip_prefix("Bearer ")) {
        Some(Some(provided_key)) if provided_key == expected_key.as_str() => None,
        Some(Some(_)) => Some("Invalid API key"),
        Some(None) => Some("Invalid Authorization header format. Expected: Bearer <api_key>"),
        None => Some("API key required. Set Authorization: Bearer <api_key>"),
    };

    let Some(message) = rejection else {
        return next.run(request).await;
    };

    tracing::debug!("Rejected {} {}: {}", request.method(), request.uri(), message);
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}
