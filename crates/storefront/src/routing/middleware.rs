//! Host-routing middleware
//!
//! Must wrap the whole router (see `crate::create_app`): a rewrite only
//! changes which handler runs if it happens before route matching.

use axum::{
    extract::{Request, State},
    http::{header::HOST, uri::PathAndQuery, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, warn};

use super::headers::{routing_headers, strip_routing_headers};
use super::RouteDecision;
use crate::{error::ApiError, state::AppState};

/// Classify the request by host and path, then rewrite, proxy or pass it on.
pub async fn host_routing(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    strip_routing_headers(request.headers_mut());

    let host = request_host(&request);
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);

    let decision = state.host_router.classify(&host, &path, query.as_deref());

    match decision {
        RouteDecision::PassThrough => next.run(request).await,

        RouteDecision::BackendProxy { target } => {
            debug!(host = %host, path = %path, target = %target, "Proxying request to backend");

            match state
                .backend
                .forward(request, target, state.config.max_proxy_body_bytes)
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    error!("Backend proxy failed for {}: {}", path, e);
                    ApiError::BadGateway("Backend tidak dapat dihubungi".to_string()).into_response()
                }
            }
        }

        rewrite => {
            let Some(new_path) = rewrite.rewritten_path() else {
                return next.run(request).await;
            };

            match rewrite_uri(request.uri(), new_path, query.as_deref()) {
                Ok(uri) => *request.uri_mut() = uri,
                Err(e) => {
                    warn!("Cannot rewrite {} to {}: {}", path, new_path, e);
                    return next.run(request).await;
                }
            }

            debug!(
                host = %host,
                from = %path,
                to = %new_path,
                kind = rewrite.kind(),
                "Rewrote request path"
            );

            let headers = routing_headers(&rewrite);
            for (name, value) in &headers {
                request.headers_mut().insert(name.clone(), value.clone());
            }

            let mut response = next.run(request).await;
            for (name, value) in headers {
                response.headers_mut().insert(name, value);
            }
            response
        }
    }
}

/// Host header, falling back to the URI authority (HTTP/2), else empty
fn request_host(request: &Request) -> String {
    request
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| request.uri().authority().map(|a| a.to_string()))
        .unwrap_or_default()
}

/// Replace the path of `uri`, keeping scheme, authority and query
fn rewrite_uri(uri: &Uri, path: &str, query: Option<&str>) -> Result<Uri, axum::http::Error> {
    let path_and_query = match query {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}
