//! Shared route helpers: health check and error responses

use crate::error::CoreError;
use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Map a handler error to its JSON response
///
/// Client errors carry `{ "error": <message> }`; store failures carry
/// `{ "err": <store error> }` with a 500.
pub fn error_response(e: CoreError) -> Response {
    let status = match &e {
        CoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Conflict(_) => StatusCode::CONFLICT,
        CoreError::NotFound(..) => StatusCode::NOT_FOUND,
        _ => {
            tracing::error!("Request failed: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "err": e.to_string() })),
            )
                .into_response();
        }
    };

    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Decode a JSON object body; an empty body decodes as `T::default()`
///
/// Anything that is not an object (arrays included) is a validation error
/// prefixed with `expected`.
pub(super) fn decode_object<T>(body: &Bytes, expected: &str) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    if body.is_empty() {
        return Ok(T::default());
    }

    let invalid = |e: serde_json::Error| CoreError::Validation(format!("{} ({})", expected, e));
    let object: Map<String, Value> = serde_json::from_slice(body).map_err(invalid)?;
    serde_json::from_value(Value::Object(object)).map_err(invalid)
}

/// Treat absent and empty strings alike
pub(super) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
