//! Headers carrying the host router's result to page handlers

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use super::RouteDecision;

/// Tenant subdomain resolved from the host
pub const X_SUBDOMAIN: HeaderName = HeaderName::from_static("x-subdomain");

/// Host header as received from the client
pub const X_HOSTNAME: HeaderName = HeaderName::from_static("x-hostname");

/// Merchant custom domain (port stripped, lowercased)
pub const X_CUSTOM_DOMAIN: HeaderName = HeaderName::from_static("x-custom-domain");

/// Drop routing headers a client may have sent itself
pub(crate) fn strip_routing_headers(headers: &mut HeaderMap) {
    headers.remove(X_SUBDOMAIN);
    headers.remove(X_HOSTNAME);
    headers.remove(X_CUSTOM_DOMAIN);
}

/// Headers describing a rewrite decision. Values that are not valid header
/// text are left out.
pub(crate) fn routing_headers(decision: &RouteDecision) -> Vec<(HeaderName, HeaderValue)> {
    let pairs: Vec<(HeaderName, &str)> = match decision {
        RouteDecision::Tenant {
            subdomain,
            hostname,
            ..
        } => vec![(X_SUBDOMAIN, subdomain.as_str()), (X_HOSTNAME, hostname.as_str())],
        RouteDecision::CustomDomain {
            domain, hostname, ..
        } => vec![(X_CUSTOM_DOMAIN, domain.as_str()), (X_HOSTNAME, hostname.as_str())],
        RouteDecision::BackendProxy { .. } | RouteDecision::PassThrough => Vec::new(),
    };

    pairs
        .into_iter()
        .filter_map(|(name, value)| HeaderValue::from_str(value).ok().map(|v| (name, v)))
        .collect()
}
