//! Hostname predicates used by the host router
//!
//! All helpers are pure string checks. They never fail: anything that does
//! not look like a usable hostname simply answers `false`/`None`.

/// Subdomains that never resolve to a store
pub const RESERVED_SUBDOMAINS: &[&str] = &[
    "www", "api", "admin", "dashboard", "app", "mail", "smtp", "ftp", "webmail", "cpanel",
    "staging", "dev", "test",
];

/// Normalize a host header value: drop the port and the trailing dot of a
/// fully qualified name, lowercase.
///
/// Bracketed IPv6 literals (`[::1]:3000`) keep their brackets so they can
/// still be recognised as IP literals.
pub fn normalize_host(host: &str) -> String {
    let host = host.trim();
    let host = if host.starts_with('[') {
        match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };
    let host = host.strip_suffix('.').unwrap_or(host);
    host.to_ascii_lowercase()
}

/// Lenient dotted-quad check: four non-empty all-digit groups.
///
/// Octet ranges are not validated, so `999.1.1.1` counts as an IP literal.
pub fn is_ipv4_literal(host: &str) -> bool {
    let groups: Vec<&str> = host.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit()))
}

/// `localhost`, a dotted quad or a bracketed IPv6 literal
pub fn is_local_or_ip(host: &str) -> bool {
    host == "localhost" || is_ipv4_literal(host) || host.starts_with('[')
}

/// Extract the tenant subdomain from a host header value.
///
/// Returns the first label when the host has at least three labels and the
/// label is not `www`. Ports are ignored; `localhost` and IP literals never
/// carry a subdomain.
pub fn extract_subdomain(host: &str) -> Option<String> {
    let host = normalize_host(host);

    if is_local_or_ip(&host) {
        return None;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 3 {
        return None;
    }

    match labels[0] {
        "" | "www" => None,
        subdomain => Some(subdomain.to_string()),
    }
}

/// Case-insensitive membership in [`RESERVED_SUBDOMAINS`]
pub fn is_reserved_subdomain(subdomain: &str) -> bool {
    RESERVED_SUBDOMAINS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(subdomain))
}

/// `true` when the host is the root domain itself or any name below it
pub fn is_within_root_domain(host: &str, root_domain: &str) -> bool {
    let host = normalize_host(host);
    let root = root_domain.to_ascii_lowercase();

    host == root
        || host
            .strip_suffix(&root)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Check whether a host is a merchant-owned custom domain.
///
/// Anything outside the root domain qualifies, except `localhost`, IP
/// literals and an empty host.
pub fn is_custom_domain(host: &str, root_domain: &str) -> bool {
    let normalized = normalize_host(host);

    if normalized.is_empty() || is_local_or_ip(&normalized) {
        return false;
    }

    !is_within_root_domain(&normalized, root_domain)
}
