//! HTTP routes

pub mod bank_accounts;
pub mod health;
pub mod orders;
pub mod shipping;
pub mod storefront;
pub mod stores;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    backend::BackendResponse,
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Generic failure message for unexpected backend errors
pub(crate) const SERVER_ERROR_MESSAGE: &str = "Terjadi kesalahan server";

/// Storefront pages on subdomains and custom domains call these endpoints
/// cross-origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Pass a successful backend response through unchanged; turn a failure
/// status into the error envelope, keeping the backend's message if any.
pub(crate) fn require_success(
    response: BackendResponse,
    fallback: &str,
) -> ApiResult<BackendResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Upstream {
            status: response.status,
            message: response.message_or(fallback),
        })
    }
}

/// Create all routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (skipped by the host router)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness));

    // JSON API used by storefront pages - under /api
    let api_routes = Router::new()
        .route("/public/stores", get(stores::list_stores))
        .route(
            "/public/stores/:uuid",
            get(stores::get_store).put(stores::update_store),
        )
        .route("/checkout", post(orders::checkout))
        .route("/order/:uuid", get(orders::get_order))
        .route("/shipping/calculate", post(shipping::calculate))
        .route(
            "/stores/:store_uuid/bank-accounts",
            get(bank_accounts::list_bank_accounts),
        )
        .layer(cors_layer());

    // Internal page routes that host rewrites land on
    let tenant_prefix = &state.config.tenant_path_prefix;
    let domain_prefix = &state.config.custom_domain_path_prefix;
    let page_routes = Router::new()
        .route(
            &format!("{}/:subdomain", tenant_prefix),
            get(storefront::tenant_page),
        )
        .route(
            &format!("{}/:subdomain/*rest", tenant_prefix),
            get(storefront::tenant_page),
        )
        .route(
            &format!("{}/:domain", domain_prefix),
            get(storefront::custom_domain_page),
        )
        .route(
            &format!("{}/:domain/*rest", domain_prefix),
            get(storefront::custom_domain_page),
        );

    let body_limit = state.config.max_proxy_body_bytes;

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .merge(page_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
