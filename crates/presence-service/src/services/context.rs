//! Service context - dependency container for services

use std::sync::Arc;

use presence_cache::RedisPool;
use presence_common::auth::JwtService;
use presence_common::PresenceConfig;
use presence_core::traits::{EventPublisher, SessionRepository, UserRepository};
use presence_core::{IdGenerator, UserId};
use presence_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// Backends are trait objects so the same services run over Postgres/Redis
/// or the in-process stores.
#[derive(Clone)]
pub struct ServiceContext {
    // Backing pools, kept for readiness probes
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,

    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,

    /// `None` when presence broadcasting is switched off
    publisher: Option<Arc<dyn EventPublisher>>,

    jwt_service: Arc<JwtService>,
    id_generator: Arc<IdGenerator>,
    presence: PresenceConfig,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    pub fn redis_pool(&self) -> Option<&RedisPool> {
        self.redis_pool.as_ref()
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn session_repo(&self) -> &dyn SessionRepository {
        self.session_repo.as_ref()
    }

    pub fn publisher(&self) -> Option<&dyn EventPublisher> {
        self.publisher.as_deref()
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn presence(&self) -> &PresenceConfig {
        &self.presence
    }

    /// Mint a new user id
    pub fn generate_id(&self) -> UserId {
        self.id_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("postgres", &self.pool.is_some())
            .field("redis", &self.redis_pool.is_some())
            .field("broadcast", &self.publisher.is_some())
            .field("presence", &self.presence)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<RedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn SessionRepository>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    jwt_service: Option<Arc<JwtService>>,
    id_generator: Option<Arc<IdGenerator>>,
    presence: PresenceConfig,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: RedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn SessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn id_generator(mut self, generator: Arc<IdGenerator>) -> Self {
        self.id_generator = Some(generator);
        self
    }

    pub fn presence(mut self, presence: PresenceConfig) -> Self {
        self.presence = presence;
        self
    }

    /// Build the ServiceContext
    ///
    /// A publisher is dropped when `presence.broadcast` is off.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let publisher = if self.presence.broadcast {
            self.publisher
        } else {
            None
        };

        Ok(ServiceContext {
            pool: self.pool,
            redis_pool: self.redis_pool,
            user_repo: self
                .user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            session_repo: self
                .session_repo
                .ok_or_else(|| ServiceError::validation("session_repo is required"))?,
            publisher,
            jwt_service: self
                .jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            id_generator: self
                .id_generator
                .unwrap_or_else(|| Arc::new(IdGenerator::new(0))),
            presence: self.presence,
        })
    }
}
