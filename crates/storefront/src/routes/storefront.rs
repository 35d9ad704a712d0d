//! Storefront page endpoints
//!
//! Tenant and custom-domain requests are rewritten onto these routes by the
//! host router. They resolve the store and return the page context the
//! renderer needs: which store, which page, and its metadata.

use axum::{
    extract::{Path, State},
    http::{header::HOST, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokoku_shared::{BackendEnvelope, DomainStore, StoreData};
use tracing::{debug, error, warn};
use url::form_urlencoded;

use crate::{
    backend::BackendError,
    error::{ApiError, ApiResult},
    routing::{X_CUSTOM_DOMAIN, X_HOSTNAME},
    seo::{build_metadata, SiteUrls, StoreMetadata},
    state::AppState,
};

const BACKEND_UNREACHABLE: &str = "Backend tidak dapat dihubungi";

#[derive(Debug, Deserialize)]
pub struct TenantPath {
    pub subdomain: String,
    #[serde(default)]
    pub rest: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DomainPath {
    pub domain: String,
    #[serde(default)]
    pub rest: Option<String>,
}

/// Page context returned for a storefront request
#[derive(Debug, Serialize)]
pub struct StorePage {
    pub subdomain: String,
    /// Page path within the store, always starting with `/`
    pub path: String,
    pub hostname: Option<String>,
    pub custom_domain: Option<String>,
    pub metadata: StoreMetadata,
}

/// `GET {tenant_prefix}/:subdomain[/*rest]`
pub async fn tenant_page(
    State(state): State<AppState>,
    Path(params): Path<TenantPath>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let context = PageContext {
        subdomain: params.subdomain,
        path: page_path(params.rest.as_deref()),
        hostname: hostname(&headers),
        custom_domain: header_value(&headers, X_CUSTOM_DOMAIN.as_str()),
    };

    store_page(&state, context).await
}

/// `GET {custom_domain_prefix}/:domain[/*rest]`
///
/// Looks the domain up to find the store it is linked to, then serves that
/// store's page.
pub async fn custom_domain_page(
    State(state): State<AppState>,
    Path(params): Path<DomainPath>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let domain = params.domain.to_ascii_lowercase();
    let subdomain = resolve_domain(&state, &domain).await?;

    debug!(domain = %domain, subdomain = %subdomain, "Resolved custom domain");

    let context = PageContext {
        subdomain,
        path: page_path(params.rest.as_deref()),
        hostname: hostname(&headers),
        custom_domain: Some(domain),
    };

    store_page(&state, context).await
}

struct PageContext {
    subdomain: String,
    path: String,
    hostname: Option<String>,
    custom_domain: Option<String>,
}

async fn store_page(state: &AppState, context: PageContext) -> ApiResult<Response> {
    let store = fetch_store(state, &context.subdomain).await?;

    let (status, metadata) = match store {
        Some(data) => {
            let urls = SiteUrls::from_config(&state.config);
            (
                StatusCode::OK,
                build_metadata(&context.subdomain, &data, &urls),
            )
        }
        None => (StatusCode::NOT_FOUND, StoreMetadata::not_found()),
    };

    let page = StorePage {
        subdomain: context.subdomain,
        path: context.path,
        hostname: context.hostname,
        custom_domain: context.custom_domain,
        metadata,
    };

    Ok((status, Json(page)).into_response())
}

/// Fetch the store profile. `None` means there is no store to show; only a
/// backend that cannot be reached is an error.
async fn fetch_store(state: &AppState, subdomain: &str) -> ApiResult<Option<StoreData>> {
    let response = match state.backend.get_json(&["api", "store", subdomain], None).await {
        Ok(response) => response,
        Err(BackendError::InvalidBody(status)) => {
            debug!(subdomain = %subdomain, %status, "Store lookup returned no JSON");
            return Ok(None);
        }
        Err(e) => {
            error!("Error fetching store data for {}: {}", subdomain, e);
            return Err(ApiError::BadGateway(BACKEND_UNREACHABLE.to_string()));
        }
    };

    if !response.is_success() {
        return Ok(None);
    }

    match serde_json::from_value::<BackendEnvelope<StoreData>>(response.body) {
        Ok(envelope) => Ok(envelope.into_data()),
        Err(e) => {
            warn!(subdomain = %subdomain, "Unreadable store data: {}", e);
            Ok(None)
        }
    }
}

/// Map a custom domain to the subdomain of the store it is linked to
async fn resolve_domain(state: &AppState, domain: &str) -> ApiResult<String> {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("domain", domain)
        .finish();

    let not_linked = || {
        ApiError::NotFound("Domain belum terhubung atau toko tidak ditemukan".to_string())
    };

    let response = match state
        .backend
        .get_json(&["api", "public", "stores"], Some(&query))
        .await
    {
        Ok(response) if response.is_success() => response,
        Ok(_) | Err(BackendError::InvalidBody(_)) => return Err(not_linked()),
        Err(e) => {
            error!("Error fetching store for domain {}: {}", domain, e);
            return Err(ApiError::BadGateway(BACKEND_UNREACHABLE.to_string()));
        }
    };

    serde_json::from_value::<BackendEnvelope<DomainStore>>(response.body)
        .ok()
        .and_then(BackendEnvelope::into_data)
        .and_then(|store| store.subdomain)
        .filter(|subdomain| !subdomain.trim().is_empty())
        .ok_or_else(|| ApiError::NotFound("Toko tidak ditemukan".to_string()))
}

fn page_path(rest: Option<&str>) -> String {
    match rest {
        Some(rest) if !rest.is_empty() => format!("/{}", rest.trim_start_matches('/')),
        _ => "/".to_string(),
    }
}

/// Public hostname: the one the host router recorded, else the Host header
fn hostname(headers: &HeaderMap) -> Option<String> {
    header_value(headers, X_HOSTNAME.as_str()).or_else(|| header_value(headers, HOST.as_str()))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
