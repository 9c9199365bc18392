//! Liveness and readiness probes

use presence_db::ping;
use tracing::warn;

use crate::dto::{CheckStatus, HealthResponse, ReadinessResponse};

use super::context::ServiceContext;

pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Liveness never touches the backends
    pub fn liveness(&self) -> HealthResponse {
        HealthResponse::healthy()
    }

    /// Probe Postgres and Redis when they back this instance
    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.pool() {
            Some(pool) => {
                let result = ping(pool).await;
                if let Err(e) = &result {
                    warn!(error = %e, "Database readiness probe failed");
                }
                CheckStatus::from_probe(result.is_ok())
            }
            None => CheckStatus::InMemory,
        };

        let redis = match self.ctx.redis_pool() {
            Some(pool) => {
                let result = pool.health_check().await;
                if let Err(e) = &result {
                    warn!(error = %e, "Redis readiness probe failed");
                }
                CheckStatus::from_probe(result.is_ok())
            }
            None => CheckStatus::InMemory,
        };

        ReadinessResponse::new(database, redis)
    }
}
