//! Shipping cost calculation

use axum::{extract::State, http::Method, Json};
use tokoku_shared::{BackendShippingQuote, ShippingQuoteRequest};
use tracing::{debug, error};

use super::{require_success, SERVER_ERROR_MESSAGE};
use crate::{
    backend::BackendResponse,
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Convert the storefront's camelCase request to the backend's shape and
/// return the quote
pub async fn calculate(
    State(state): State<AppState>,
    Json(req): Json<ShippingQuoteRequest>,
) -> ApiResult<BackendResponse> {
    let quote = BackendShippingQuote::try_from(req).map_err(|e| {
        debug!("Rejected shipping quote: {}", e);
        ApiError::Validation("Store UUID dan alamat tujuan wajib diisi".to_string())
    })?;

    let response = state
        .backend
        .send_json(Method::POST, &["api", "shipping", "calculate"], &quote)
        .await
        .map_err(|e| {
            error!("Calculate shipping failed: {}", e);
            ApiError::backend(SERVER_ERROR_MESSAGE)
        })?;

    require_success(response, "Gagal menghitung biaya pengiriman")
}
