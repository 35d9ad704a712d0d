//! Store bank accounts shown on the payment step

use axum::extract::{Path, State};
use tracing::error;

use super::require_success;
use crate::{
    backend::BackendResponse,
    error::{ApiError, ApiResult},
    state::AppState,
};

pub async fn list_bank_accounts(
    State(state): State<AppState>,
    Path(store_uuid): Path<String>,
) -> ApiResult<BackendResponse> {
    let response = state
        .backend
        .get_json(&["api", "stores", &store_uuid, "bank-accounts"], None)
        .await
        .map_err(|e| {
            error!("Bank accounts for {} failed: {}", store_uuid, e);
            ApiError::backend("Internal server error")
        })?;

    require_success(response, "Failed to fetch bank accounts")
}
