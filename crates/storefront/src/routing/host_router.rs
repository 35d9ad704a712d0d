//! Host-based request classification
//!
//! Decides, from the `Host` header and the request path alone, whether a
//! request belongs to a tenant storefront, a merchant custom domain, the
//! backend proxy, or none of these. Rules are evaluated in order and the
//! first match wins:
//!
//! 1. Internal paths (static assets, image optimisation, favicon, health
//!    probes, files with an extension, the `/api` namespace except the
//!    proxy prefix) pass through untouched.
//! 2. `tokobunga.aidareu.com/products` -> `/s/tokobunga/products`
//! 3. `mystore.example.com/products` -> `/d/mystore.example.com/products`
//! 4. `/api/proxy/products?x=1` -> `{backend}/products?x=1`
//! 5. Everything else passes through.
//!
//! The router holds only immutable configuration, so one instance is shared
//! by every request.

use url::Url;

use super::hostname::{
    extract_subdomain, is_custom_domain, is_reserved_subdomain, is_within_root_domain,
    normalize_host,
};

/// Default tenant storefront path prefix (`/s/{subdomain}`)
pub const DEFAULT_TENANT_PATH_PREFIX: &str = "/s";

/// Default custom domain path prefix (`/d/{domain}`)
pub const DEFAULT_CUSTOM_DOMAIN_PATH_PREFIX: &str = "/d";

/// Default backend proxy prefix
pub const DEFAULT_PROXY_PATH_PREFIX: &str = "/api/proxy";

/// Internal API namespace served by this process, never host-routed
pub const INTERNAL_API_PREFIX: &str = "/api";

/// Path prefixes that are never classified
pub const DEFAULT_SKIP_PREFIXES: &[&str] = &[
    "/_next/static",
    "/_next/image",
    "/static",
    "/assets",
    "/favicon.ico",
    "/health",
];

/// Router configuration, built once at startup
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Platform root domain, e.g. `aidareu.com`
    pub root_domain: String,
    pub tenant_path_prefix: String,
    pub custom_domain_path_prefix: String,
    pub proxy_path_prefix: String,
    /// Base URL that proxied paths are appended to
    pub backend_base_url: Url,
    pub skip_prefixes: Vec<String>,
}

impl RouterConfig {
    /// Configuration with the default prefixes and skip list
    pub fn new(root_domain: impl Into<String>, backend_base_url: Url) -> Self {
        Self {
            root_domain: root_domain.into().to_ascii_lowercase(),
            tenant_path_prefix: DEFAULT_TENANT_PATH_PREFIX.to_string(),
            custom_domain_path_prefix: DEFAULT_CUSTOM_DOMAIN_PATH_PREFIX.to_string(),
            proxy_path_prefix: DEFAULT_PROXY_PATH_PREFIX.to_string(),
            backend_base_url,
            skip_prefixes: DEFAULT_SKIP_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Outcome of classifying one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve the tenant storefront at `path`
    Tenant {
        subdomain: String,
        /// Host header exactly as received
        hostname: String,
        path: String,
    },
    /// Serve the custom-domain resolver at `path`
    CustomDomain {
        domain: String,
        hostname: String,
        path: String,
    },
    /// Forward the request to the backend API
    BackendProxy { target: Url },
    /// Leave the request untouched
    PassThrough,
}

impl RouteDecision {
    /// Internal path the request should be served from, for local rewrites
    pub fn rewritten_path(&self) -> Option<&str> {
        match self {
            RouteDecision::Tenant { path, .. } | RouteDecision::CustomDomain { path, .. } => {
                Some(path.as_str())
            }
            RouteDecision::BackendProxy { .. } | RouteDecision::PassThrough => None,
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            RouteDecision::Tenant { .. } => "tenant",
            RouteDecision::CustomDomain { .. } => "custom_domain",
            RouteDecision::BackendProxy { .. } => "backend_proxy",
            RouteDecision::PassThrough => "pass_through",
        }
    }
}

/// Stateless hostname/path classifier
#[derive(Debug, Clone)]
pub struct HostRouter {
    config: RouterConfig,
}

impl HostRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Classify a request.
    ///
    /// `host` is the raw `Host` header (empty when absent), `path` the URI
    /// path and `query` the raw query string without the leading `?`.
    pub fn classify(&self, host: &str, path: &str, query: Option<&str>) -> RouteDecision {
        if self.is_skipped_path(path) {
            return RouteDecision::PassThrough;
        }

        if let Some(decision) = self.tenant_rewrite(host, path) {
            return decision;
        }

        if let Some(decision) = self.custom_domain_rewrite(host, path) {
            return decision;
        }

        if let Some(target) = self.proxy_target(path, query) {
            return RouteDecision::BackendProxy { target };
        }

        RouteDecision::PassThrough
    }

    fn tenant_rewrite(&self, host: &str, path: &str) -> Option<RouteDecision> {
        let subdomain = extract_subdomain(host)?;

        // Only names under our own domain are tenant storefronts; anything
        // else with three labels is a custom domain.
        if !is_within_root_domain(host, &self.config.root_domain) {
            return None;
        }

        if is_reserved_subdomain(&subdomain) {
            return None;
        }

        let prefix = &self.config.tenant_path_prefix;
        if path.starts_with(&format!("{}/", prefix)) {
            return None;
        }

        Some(RouteDecision::Tenant {
            path: format!("{}/{}{}", prefix, subdomain, path_suffix(path)),
            subdomain,
            hostname: host.to_string(),
        })
    }

    fn custom_domain_rewrite(&self, host: &str, path: &str) -> Option<RouteDecision> {
        if !is_custom_domain(host, &self.config.root_domain) {
            return None;
        }

        let prefix = &self.config.custom_domain_path_prefix;
        if path.starts_with(&format!("{}/", prefix)) {
            return None;
        }

        let domain = normalize_host(host);
        Some(RouteDecision::CustomDomain {
            path: format!("{}/{}{}", prefix, domain, path_suffix(path)),
            domain,
            hostname: host.to_string(),
        })
    }

    fn proxy_target(&self, path: &str, query: Option<&str>) -> Option<Url> {
        let rest = path.strip_prefix(&self.config.proxy_path_prefix)?;
        if !rest.starts_with('/') {
            return None;
        }

        if rest.split('/').any(is_dot_segment) {
            return None;
        }

        let base = self.config.backend_base_url.as_str().trim_end_matches('/');
        let mut target = Url::parse(&format!("{}{}", base, rest)).ok()?;

        // The target must stay under the backend base path
        let base_path = self.config.backend_base_url.path().trim_end_matches('/');
        if !has_path_prefix(target.path(), base_path) {
            return None;
        }

        target.set_query(query);
        Some(target)
    }

    fn is_skipped_path(&self, path: &str) -> bool {
        // Proxy paths are always classified, extension or not
        if path.starts_with(&format!("{}/", self.config.proxy_path_prefix)) {
            return false;
        }

        if has_path_prefix(path, INTERNAL_API_PREFIX) {
            return true;
        }

        if self
            .config
            .skip_prefixes
            .iter()
            .any(|prefix| has_path_prefix(path, prefix))
        {
            return true;
        }

        // Static files: last segment carries an extension
        path.rsplit('/')
            .next()
            .is_some_and(|segment| segment.contains('.'))
    }
}

/// Path appended after the tenant/domain segment; the root maps to nothing
fn path_suffix(path: &str) -> &str {
    if path == "/" {
        ""
    } else {
        path
    }
}

/// `.` or `..`, including their percent-encoded spellings
fn is_dot_segment(segment: &str) -> bool {
    let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// Segment-aware prefix match: `/health` matches `/health` and
/// `/health/live` but not `/healthy-snacks`
fn has_path_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
