//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, configuration and the local event hub.

use std::sync::Arc;

use presence_cache::EventHub;
use presence_common::AppConfig;
use presence_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    /// Fan-out point for presence observers on this instance
    hub: EventHub,
}

impl AppState {
    /// Bundle the service context, config and observer hub
    pub fn new(service_context: ServiceContext, config: AppConfig, hub: EventHub) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            hub,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get the hub WebSocket observers subscribe to
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("observers", &self.hub.observer_count())
            .finish_non_exhaustive()
    }
}
