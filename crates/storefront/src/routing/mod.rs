//! Host-based routing for the storefront
//!
//! Resolves the incoming Host header to a storefront, enabling URLs like:
//! - Tenant subdomains: tokobunga.aidareu.com -> /s/tokobunga
//! - Custom domains: tokobunga.id -> /d/tokobunga.id
//! - Backend proxy: /api/proxy/products -> {API_URL}/products

mod headers;
mod host_router;
mod hostname;
mod middleware;

pub use headers::{X_CUSTOM_DOMAIN, X_HOSTNAME, X_SUBDOMAIN};
pub use host_router::{
    HostRouter, RouteDecision, RouterConfig, DEFAULT_CUSTOM_DOMAIN_PATH_PREFIX,
    DEFAULT_PROXY_PATH_PREFIX, DEFAULT_SKIP_PREFIXES, DEFAULT_TENANT_PATH_PREFIX,
    INTERNAL_API_PREFIX,
};
pub use hostname::{
    extract_subdomain, is_custom_domain, is_ipv4_literal, is_reserved_subdomain,
    normalize_host, RESERVED_SUBDOMAINS,
};
pub use middleware::host_routing;
