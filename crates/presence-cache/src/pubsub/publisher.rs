//! Redis Pub/Sub publisher.

use async_trait::async_trait;
use presence_core::traits::{EventPublisher, RepoResult};
use presence_core::DomainEvent;
use redis::AsyncCommands;

use crate::pool::{RedisPool, RedisPoolError};
use crate::pubsub::PubSubChannel;

/// Publishes events as JSON on their Redis channel, for every instance's subscriber
#[derive(Clone, Debug)]
pub struct RedisEventPublisher {
    pool: RedisPool,
}

impl RedisEventPublisher {
    /// Create a publisher over the given pool
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> RepoResult<usize> {
        let channel = PubSubChannel::for_event(event);
        let payload = serde_json::to_string(event).map_err(RedisPoolError::from)?;

        let mut conn = self.pool.get().await?;
        let receivers: usize = conn
            .publish(channel.name(), &payload)
            .await
            .map_err(RedisPoolError::from)?;

        tracing::debug!(
            channel = %channel,
            event_type = event.event_type(),
            receivers,
            "Published event"
        );

        Ok(receivers)
    }
}
