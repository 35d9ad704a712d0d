//! Application configuration

use std::env;

use url::Url;

use crate::routing::{
    RouterConfig, DEFAULT_CUSTOM_DOMAIN_PATH_PREFIX, DEFAULT_PROXY_PATH_PREFIX,
    DEFAULT_TENANT_PATH_PREFIX,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub bind_address: String,
    pub root_domain: String, // e.g., "aidareu.com" for *.aidareu.com storefronts
    pub frontend_url: String,

    // Backend
    pub backend_url: Url,
    pub api_url: Url, // base for /api/proxy/* forwarding
    pub backend_timeout_ms: u64,
    pub max_proxy_body_bytes: usize,

    // Host routing
    pub tenant_path_prefix: String,
    pub custom_domain_path_prefix: String,
    pub proxy_path_prefix: String,

    // Logging
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Server
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            root_domain: env::var("ROOT_DOMAIN")
                .unwrap_or_else(|_| "aidareu.com".to_string())
                .trim()
                .to_ascii_lowercase(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "https://aidareu.com".to_string())
                .trim_end_matches('/')
                .to_string(),

            // Backend
            backend_url: parse_url(
                "BACKEND_URL",
                env::var("BACKEND_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            )?,
            api_url: parse_url(
                "API_URL",
                env::var("API_URL").unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
            )?,
            backend_timeout_ms: env::var("BACKEND_TIMEOUT_MS")
                .unwrap_or_else(|_| "30000".to_string())
                .parse()
                .unwrap_or(30000),
            max_proxy_body_bytes: env::var("MAX_PROXY_BODY_BYTES")
                .unwrap_or_else(|_| "10485760".to_string()) // 10MB default
                .parse()
                .unwrap_or(10 * 1024 * 1024),

            // Host routing
            tenant_path_prefix: parse_path_prefix(
                "TENANT_PATH_PREFIX",
                env::var("TENANT_PATH_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_TENANT_PATH_PREFIX.to_string()),
            )?,
            custom_domain_path_prefix: parse_path_prefix(
                "CUSTOM_DOMAIN_PATH_PREFIX",
                env::var("CUSTOM_DOMAIN_PATH_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_CUSTOM_DOMAIN_PATH_PREFIX.to_string()),
            )?,
            proxy_path_prefix: parse_path_prefix(
                "PROXY_PATH_PREFIX",
                env::var("PROXY_PATH_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_PROXY_PATH_PREFIX.to_string()),
            )?,

            // Logging
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }

    /// Host router configuration derived from this config
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            tenant_path_prefix: self.tenant_path_prefix.clone(),
            custom_domain_path_prefix: self.custom_domain_path_prefix.clone(),
            proxy_path_prefix: self.proxy_path_prefix.clone(),
            ..RouterConfig::new(self.root_domain.clone(), self.api_url.clone())
        }
    }
}

fn parse_url(var: &'static str, value: String) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidUrl(var, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl(
            var,
            format!("unsupported scheme '{}'", other),
        )),
    }
}

/// Prefixes must look like `/segment[/segment]`: leading slash, no trailing one
fn parse_path_prefix(var: &'static str, value: String) -> Result<String, ConfigError> {
    let value = value.trim().trim_end_matches('/').to_string();
    if !value.starts_with('/') || value.len() < 2 || value.contains(char::is_whitespace) {
        return Err(ConfigError::InvalidPathPrefix(var));
    }
    Ok(value)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in {0}: {1}")]
    InvalidUrl(&'static str, String),
    #[error("Invalid path prefix in {0}: must start with '/' and name at least one segment")]
    InvalidPathPrefix(&'static str),
}
