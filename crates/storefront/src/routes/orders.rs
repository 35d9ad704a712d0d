//! Checkout and order lookup
//!
//! Both endpoints relay the backend's reply as-is, status included; only a
//! failed call is mapped to the error envelope (with the error detail).

use axum::{
    extract::{Path, State},
    http::Method,
    Json,
};
use tokoku_shared::CheckoutRequest;
use tracing::{error, info, warn};

use crate::{
    backend::BackendResponse,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub async fn checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<BackendResponse> {
    if let Err(e) = req.validate() {
        warn!("Rejected checkout: {}", e);
        return Err(ApiError::Validation("Data tidak lengkap".to_string()));
    }

    let response = state
        .backend
        .send_json(Method::POST, &["api", "checkout"], &req)
        .await
        .map_err(|e| {
            error!("Error creating order: {}", e);
            ApiError::backend_with_detail("Gagal membuat order", &e)
        })?;

    info!(status = %response.status, "Checkout forwarded");
    Ok(response)
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> ApiResult<BackendResponse> {
    state
        .backend
        .get_json(&["api", "order", &uuid], None)
        .await
        .map_err(|e| {
            error!("Error fetching order {}: {}", uuid, e);
            ApiError::backend_with_detail("Gagal mengambil data order", &e)
        })
}
