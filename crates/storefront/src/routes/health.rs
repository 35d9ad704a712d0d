//! Health check endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub backend: String,
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    // Check backend reachability
    let backend_status = if state.backend.ping().await {
        "healthy".to_string()
    } else {
        "unreachable".to_string()
    };

    let overall_status = if backend_status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        overall_status,
        Json(HealthResponse {
            status: if overall_status == StatusCode::OK {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            version: env!("CARGO_PKG_VERSION").to_string(),
            backend: backend_status,
        }),
    )
}

/// Liveness probe (just returns 200 if the server is running)
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Readiness probe (ready once the backend answers)
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.backend.ping().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::create_app;
    use crate::test_utils::{body_json, test_state};
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn get(uri: &str, host: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header("host", host)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_with_backend_up() {
        let server = mockito::Server::new_async().await;
        let app = create_app(test_state(&server.url()));

        let response = app.oneshot(get("/health", "aidareu.com")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_is_not_rewritten_on_tenant_host() {
        let server = mockito::Server::new_async().await;
        let app = create_app(test_state(&server.url()));

        let response = app
            .oneshot(get("/health/live", "tokobunga.aidareu.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("x-subdomain").is_none());
    }

    #[tokio::test]
    async fn test_readiness_with_backend_down() {
        let app = create_app(test_state("http://127.0.0.1:9"));

        let response = app.oneshot(get("/health/ready", "aidareu.com")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
