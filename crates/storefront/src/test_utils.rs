//! Test utilities and shared configuration.

use url::Url;

use crate::config::{Config, LogFormat};
use crate::routing::{
    DEFAULT_CUSTOM_DOMAIN_PATH_PREFIX, DEFAULT_PROXY_PATH_PREFIX, DEFAULT_TENANT_PATH_PREFIX,
};
use crate::state::AppState;

/// Root domain used across tests
pub const TEST_ROOT_DOMAIN: &str = "aidareu.com";

/// Configuration pointing both backend URLs at `backend_url`
/// (`API_URL` gets the usual `/api` suffix).
pub fn test_config(backend_url: &str) -> Config {
    let backend_url = backend_url.trim_end_matches('/');
    Config {
        bind_address: "127.0.0.1:0".to_string(),
        root_domain: TEST_ROOT_DOMAIN.to_string(),
        frontend_url: "https://aidareu.com".to_string(),
        backend_url: Url::parse(backend_url).unwrap(),
        api_url: Url::parse(&format!("{}/api", backend_url)).unwrap(),
        backend_timeout_ms: 5000,
        max_proxy_body_bytes: 1024 * 1024,
        tenant_path_prefix: DEFAULT_TENANT_PATH_PREFIX.to_string(),
        custom_domain_path_prefix: DEFAULT_CUSTOM_DOMAIN_PATH_PREFIX.to_string(),
        proxy_path_prefix: DEFAULT_PROXY_PATH_PREFIX.to_string(),
        log_format: LogFormat::Pretty,
    }
}

/// Application state backed by `backend_url`
pub fn test_state(backend_url: &str) -> AppState {
    AppState::new(test_config(backend_url)).unwrap()
}

/// Collect a response body as JSON (`Null` when the body is not JSON)
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
}
