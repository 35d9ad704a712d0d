//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use crate::backend::{BackendClient, BackendResult};
use crate::config::Config;
use crate::routing::HostRouter;

/// State shared by every handler and the host-routing middleware
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub host_router: Arc<HostRouter>,
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(config: Config) -> BackendResult<Self> {
        let backend = BackendClient::new(
            config.backend_url.clone(),
            Duration::from_millis(config.backend_timeout_ms),
        )?;
        let host_router = HostRouter::new(config.router_config());

        Ok(Self {
            config: Arc::new(config),
            host_router: Arc::new(host_router),
            backend,
        })
    }
}
