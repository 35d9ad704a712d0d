//! Tokoku Storefront Library
//!
//! Edge service for the Tokoku multi-tenant storefront: maps tenant
//! subdomains and custom domains onto internal page routes, proxies
//! `/api/proxy/*` to the backend, and serves the thin JSON API the
//! storefront pages call.

pub mod backend;
pub mod config;
pub mod error;
pub mod routes;
pub mod routing;
pub mod seo;
pub mod state;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_utils;

pub use config::Config;
pub use error::{ApiError, ApiResult};
pub use routing::{HostRouter, RouteDecision, RouterConfig};
pub use state::AppState;

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

/// Build the complete application.
///
/// The host-routing middleware sits outside the route table so that a
/// rewritten URI is what the inner router matches on.
pub fn create_app(state: AppState) -> Router {
    let routes = routes::create_router(state.clone());

    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn_with_state(state, routing::host_routing))
        .layer(TraceLayer::new_for_http())
}
