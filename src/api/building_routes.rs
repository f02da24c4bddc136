//! Building routes
//!
//! `GET/POST /api/v1/buildings` and `GET/PUT/DELETE /api/v1/buildings/:id`.

use super::routes::{decode_object, error_response, non_empty};
use super::AppState;
use crate::error::CoreError;
use crate::handlers::NewBuilding;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

/// Request body for create and update; presence is checked after decoding
#[derive(Debug, Default, Deserialize)]
pub struct BuildingRequest {
    pub address: Option<String>,
    pub name: Option<String>,
}

const EXPECTED_FORMAT: &str = "Expected format: { address: <String>, name: <String> }. You're missing a required property.";

fn parse_body(body: &Bytes) -> Result<NewBuilding, CoreError> {
    let req: BuildingRequest = decode_object(body, EXPECTED_FORMAT)?;

    match (non_empty(req.address), non_empty(req.name)) {
        (Some(address), Some(name)) => Ok(NewBuilding { address, name }),
        _ => Err(CoreError::Validation(EXPECTED_FORMAT.to_string())),
    }
}

fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<i64, CoreError> {
    let raw = match path {
        Ok(Path(raw)) => raw,
        Err(rejection) => {
            return Err(CoreError::NotFound(
                "Building",
                format!("Building was not found: {}", rejection.body_text()),
            ))
        }
    };
    raw.parse()
        .map_err(|_| CoreError::NotFound("Building", format!("Building {} was not found.", raw)))
}

pub async fn list_buildings(State(state): State<AppState>) -> impl IntoResponse {
    match state.buildings.list().await {
        Ok(buildings) => Json(buildings).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_building(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> impl IntoResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    match state.buildings.get(id).await {
        Ok(building) => Json(building).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn create_building(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let new = match parse_body(&body) {
        Ok(new) => new,
        Err(e) => return error_response(e),
    };

    match state.buildings.create(new).await {
        Ok(id) => (StatusCode::CREATED, Json(json!({ "id": id }))).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn update_building(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> impl IntoResponse {
    let new = match parse_body(&body) {
        Ok(new) => new,
        Err(e) => return error_response(e),
    };
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    match state.buildings.update(id, new).await {
        Ok(id) => Json(json!({ "id": id })).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn delete_building(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> impl IntoResponse {
    let id = match parse_id(id) {
        Ok(id) => id,
        Err(e) => return error_response(e),
    };

    match state.buildings.delete(id).await {
        Ok(message) => Json(json!({ "message": message })).into_response(),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::{seeded_router, send};
    use crate::db::fixtures::{FIRST_BUILDING_ADDRESS, FIRST_BUILDING_NAME};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_get_all_buildings() {
        let (status, json) = send(seeded_router(None), Method::GET, "/api/v1/buildings", None).await;

        assert_eq!(status, StatusCode::OK);
        let buildings = json.as_array().unwrap();
        assert_eq!(buildings[0]["address"], FIRST_BUILDING_ADDRESS);
        assert_eq!(buildings[0]["name"], FIRST_BUILDING_NAME);
    }

    #[tokio::test]
    async fn test_get_building_by_id() {
        let (status, json) =
            send(seeded_router(None), Method::GET, "/api/v1/buildings/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["id"], 1);
        assert_eq!(json[0]["address"], FIRST_BUILDING_ADDRESS);
        assert_eq!(json[0]["name"], FIRST_BUILDING_NAME);
    }

    #[tokio::test]
    async fn test_get_unknown_building() {
        for uri in ["/api/v1/buildings/600", "/api/v1/buildings/abc"] {
            let (status, json) = send(seeded_router(None), Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_non_utf8_id_is_json_not_found() {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let body = (method == Method::PUT)
                .then(|| json!({ "address": FIRST_BUILDING_ADDRESS, "name": FIRST_BUILDING_NAME }));
            let (status, json) =
                send(seeded_router(None), method, "/api/v1/buildings/%FF", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_create_building_returns_next_id() {
        let (status, json) = send(
            seeded_router(None),
            Method::POST,
            "/api/v1/buildings",
            Some(json!({ "address": "123 fake stree", "name": "Fake Building" })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json, json!({ "id": 241 }));
    }

    #[tokio::test]
    async fn test_create_existing_building_conflicts() {
        let (status, json) = send(
            seeded_router(None),
            Method::POST,
            "/api/v1/buildings",
            Some(json!({ "address": FIRST_BUILDING_ADDRESS, "name": FIRST_BUILDING_NAME })),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_with_missing_params() {
        let bodies = [
            None,
            Some(json!({})),
            Some(json!({ "address": "123 fake stree" })),
            Some(json!({ "address": "", "name": "Fake Building" })),
            Some(json!({ "address": 12, "name": "Fake Building" })),
            Some(json!(["123 fake stree", "Fake Building"])),
        ];

        for body in bodies {
            let (status, json) =
                send(seeded_router(None), Method::POST, "/api/v1/buildings", body).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(json["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_update_building() {
        let router = seeded_router(None);
        let body = json!({ "address": FIRST_BUILDING_ADDRESS, "name": "Modera Perrrrk" });

        for _ in 0..2 {
            let (status, json) = send(
                router.clone(),
                Method::PUT,
                "/api/v1/buildings/1",
                Some(body.clone()),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json, json!({ "id": 1 }));
        }

        let (_, json) = send(router, Method::GET, "/api/v1/buildings/1", None).await;
        assert_eq!(json[0]["name"], "Modera Perrrrk");
    }

    #[tokio::test]
    async fn test_update_with_array_body() {
        let (status, json) = send(
            seeded_router(None),
            Method::PUT,
            "/api/v1/buildings/1",
            Some(json!([FIRST_BUILDING_ADDRESS, "Modera Perrrrk"])),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_unknown_building() {
        let (status, json) = send(
            seeded_router(None),
            Method::PUT,
            "/api/v1/buildings/600",
            Some(json!({ "address": FIRST_BUILDING_ADDRESS, "name": "Modera Perrrrk" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_with_wrong_params() {
        let (status, json) = send(
            seeded_router(None),
            Method::PUT,
            "/api/v1/buildings/1",
            Some(json!({ "address": FIRST_BUILDING_ADDRESS, "cheese": "cheddar" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_delete_building() {
        let router = seeded_router(None);

        let (status, json) = send(router.clone(), Method::DELETE, "/api/v1/buildings/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["message"].is_string());

        let (status, _) = send(router, Method::GET, "/api/v1/buildings/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_unknown_building() {
        let (status, json) =
            send(seeded_router(None), Method::DELETE, "/api/v1/buildings/600", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].is_string());
    }
}
