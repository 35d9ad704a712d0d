//! Public store profile endpoints

use axum::{
    extract::{Path, RawQuery, State},
    http::Method,
    Json,
};
use serde_json::{json, Value};
use tokoku_shared::UpdateStoreRequest;
use tracing::{error, info};

use super::{require_success, SERVER_ERROR_MESSAGE};
use crate::{
    backend::BackendResponse,
    error::{ApiError, ApiResult},
    state::AppState,
};

const FETCH_FAILED: &str = "Gagal mengambil data toko";
const UPDATE_FAILED: &str = "Gagal mengupdate toko";
const UPDATED: &str = "Toko berhasil diupdate!";

/// List public stores; the query string is forwarded untouched
pub async fn list_stores(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<BackendResponse> {
    let response = state
        .backend
        .get_json(&["api", "public", "stores"], query.as_deref())
        .await
        .map_err(|e| {
            error!("Get public stores failed: {}", e);
            ApiError::backend(SERVER_ERROR_MESSAGE)
        })?;

    require_success(response, FETCH_FAILED)
}

pub async fn get_store(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> ApiResult<BackendResponse> {
    let response = state
        .backend
        .get_json(&["api", "public", "stores", &uuid], None)
        .await
        .map_err(|e| {
            error!("Get store {} failed: {}", uuid, e);
            ApiError::backend(SERVER_ERROR_MESSAGE)
        })?;

    require_success(response, FETCH_FAILED)
}

/// Update a store profile. Only the whitelisted profile fields reach the
/// backend; the reply is reduced to `{message, data}`.
pub async fn update_store(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    Json(req): Json<UpdateStoreRequest>,
) -> ApiResult<Json<Value>> {
    info!(store = %uuid, "Updating store profile");

    let response = state
        .backend
        .send_json(Method::PUT, &["api", "public", "stores", &uuid], &req)
        .await
        .map_err(|e| {
            error!("Update store {} failed: {}", uuid, e);
            ApiError::backend(SERVER_ERROR_MESSAGE)
        })?;

    let response = require_success(response, UPDATE_FAILED)?;

    let mut body = json!({ "message": response.message_or(UPDATED) });
    if let Some(data) = ["data", "store"]
        .iter()
        .filter_map(|key| response.body.get(*key))
        .find(|value| !value.is_null())
    {
        body["data"] = data.clone();
    }

    Ok(Json(body))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::create_app;
    use crate::test_utils::{body_json, test_state};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use mockito::Matcher;
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_list_stores_forwards_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/public/stores")
            .match_query(Matcher::Exact("domain=tokobunga.id".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"data":{"subdomain":"tokobunga"}}"#)
            .create_async()
            .await;

        let request = Request::builder()
            .uri("/api/public/stores?domain=tokobunga.id")
            .header("host", "aidareu.com")
            .body(Body::empty())
            .unwrap();
        let response = create_app(test_state(&server.url()))
            .oneshot(request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "success": true, "data": { "subdomain": "tokobunga" } })
        );
    }

    #[tokio::test]
    async fn test_get_store_failure_uses_fallback_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/public/stores/abc")
            .with_status(404)
            .with_body(r#"{"success":false}"#)
            .create_async()
            .await;

        let request = Request::builder()
            .uri("/api/public/stores/abc")
            .body(Body::empty())
            .unwrap();
        let response = create_app(test_state(&server.url()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": "Gagal mengambil data toko" })
        );
    }

    #[tokio::test]
    async fn test_update_store_whitelists_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/public/stores/abc")
            .match_body(Matcher::Json(json!({
                "nama_toko": "Toko Bunga",
                "kota": "Bandung"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"store":{"uuid":"abc","nama_toko":"Toko Bunga"}}"#)
            .create_async()
            .await;

        let request = Request::builder()
            .method("PUT")
            .uri("/api/public/stores/abc")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "nama_toko": "Toko Bunga",
                    "kota": "Bandung",
                    "is_admin": true
                })
                .to_string(),
            ))
            .unwrap();
        let response = create_app(test_state(&server.url()))
            .oneshot(request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "Toko berhasil diupdate!",
                "data": { "uuid": "abc", "nama_toko": "Toko Bunga" }
            })
        );
    }

    #[tokio::test]
    async fn test_update_store_relays_backend_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/api/public/stores/abc")
            .with_status(422)
            .with_body(r#"{"message":"Subdomain sudah dipakai"}"#)
            .create_async()
            .await;

        let request = Request::builder()
            .method("PUT")
            .uri("/api/public/stores/abc")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"subdomain":"taken"}"#))
            .unwrap();
        let response = create_app(test_state(&server.url()))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await["message"], "Subdomain sudah dipakai");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/public/stores")
            .header("host", "tokobunga.aidareu.com")
            .header("origin", "https://tokobunga.aidareu.com")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap();
        let response = create_app(test_state("http://localhost:8080"))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .unwrap(),
            "*"
        );
    }
}
