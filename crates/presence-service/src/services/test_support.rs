//! Shared fixtures for service tests

use std::sync::Arc;

use async_trait::async_trait;
use presence_cache::{EventHub, InMemorySessionStore, LocalEventPublisher};
use presence_common::auth::JwtService;
use presence_common::PresenceConfig;
use presence_core::{DomainError, DomainEvent, EventPublisher, PresenceStatus, RepoResult};
use presence_db::InMemoryUserRepository;

use crate::dto::{AuthResponse, RegisterRequest};

use super::{AuthService, ServiceContext};

pub(crate) const PASSWORD: &str = "secret1";

pub(crate) struct TestContext {
    pub ctx: ServiceContext,
    pub users: Arc<InMemoryUserRepository>,
    pub hub: EventHub,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_presence(PresenceConfig::default())
    }

    pub fn with_default_status(status: PresenceStatus) -> Self {
        Self::with_presence(PresenceConfig {
            default_status: status,
            ..Default::default()
        })
    }

    pub fn with_presence(presence: PresenceConfig) -> Self {
        let hub = EventHub::new(16);
        Self::build(
            presence,
            Arc::new(LocalEventPublisher::new(hub.clone())),
            hub,
        )
    }

    /// Publishing always fails
    pub fn with_broken_publisher() -> Self {
        Self::build(
            PresenceConfig::default(),
            Arc::new(BrokenPublisher),
            EventHub::new(16),
        )
    }

    fn build(presence: PresenceConfig, publisher: Arc<dyn EventPublisher>, hub: EventHub) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let ctx = ServiceContext::builder()
            .user_repo(users.clone())
            .session_repo(Arc::new(InMemorySessionStore::new()))
            .publisher(publisher)
            .jwt_service(Arc::new(JwtService::new("test-secret", 900, 3600)))
            .presence(presence)
            .build()
            .unwrap();
        Self { ctx, users, hub }
    }
}

pub(crate) async fn register(ctx: &ServiceContext, name: &str, email: &str) -> AuthResponse {
    AuthService::new(ctx)
        .register(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: PASSWORD.to_string(),
            level: Some("Senior".to_string()),
            github_link: None,
        })
        .await
        .unwrap()
}

struct BrokenPublisher;

#[async_trait]
impl EventPublisher for BrokenPublisher {
    async fn publish(&self, _event: &DomainEvent) -> RepoResult<usize> {
        Err(DomainError::CacheError("publisher offline".to_string()))
    }
}
