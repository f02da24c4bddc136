//! Interest routes
//!
//! `GET /api/v1/interests[?interest=<name>]` and `POST /api/v1/interests`.

use super::routes::{decode_object, error_response, non_empty};
use super::AppState;
use crate::error::CoreError;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct ListInterestsQuery {
    pub interest: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateInterestRequest {
    pub name: Option<String>,
}

const EXPECTED_FORMAT: &str =
    "Expected format: { name: <String> }. You're missing a name property.";

/// Lists every interest, or with `?interest=<name>` the names of its users
pub async fn list_interests(
    State(state): State<AppState>,
    query: Result<Query<ListInterestsQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            return error_response(CoreError::Validation(format!(
                "Expected a single `interest` query parameter ({})",
                rejection.body_text()
            )))
        }
    };

    match non_empty(query.interest) {
        Some(name) => match state.interests.resolve_users(&name).await {
            Ok(users) => Json(users).into_response(),
            Err(e) => error_response(e),
        },
        None => match state.interests.list().await {
            Ok(interests) => Json(interests).into_response(),
            Err(e) => error_response(e),
        },
    }
}

pub async fn create_interest(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let req: CreateInterestRequest = match decode_object(&body, EXPECTED_FORMAT) {
        Ok(req) => req,
        Err(e) => return error_response(e),
    };

    let Some(name) = non_empty(req.name) else {
        return error_response(CoreError::Validation(EXPECTED_FORMAT.to_string()));
    };

    match state.interests.create(&name).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => error_response(e),
    }
}
