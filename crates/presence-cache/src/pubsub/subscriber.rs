//! Redis Pub/Sub subscriber.
//!
//! Listens on the presence channels and relays every decoded event into the
//! local [`EventHub`]. Connection loss is retried after a fixed delay.

use futures_util::StreamExt;
use presence_core::DomainEvent;
use redis::Client;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::pool::redis_pool::redact_url;
use crate::pubsub::{EventHub, PubSubChannel};

/// Subscriber configuration
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub redis_url: String,
    pub reconnect_delay: Duration,
}

impl SubscriberConfig {
    /// Subscribe using the given Redis URL
    #[must_use]
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            reconnect_delay: Duration::from_secs(1),
        }
    }

    /// Set the wait between reconnect attempts
    #[must_use]
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }
}

/// Background relay from Redis into an [`EventHub`]
pub struct Subscriber {
    config: SubscriberConfig,
    hub: EventHub,
}

/// Owner of a running subscriber task
#[derive(Debug)]
pub struct SubscriberHandle {
    task: JoinHandle<()>,
}

impl SubscriberHandle {
    /// Stop relaying
    pub fn shutdown(self) {
        self.task.abort();
    }
}

impl Subscriber {
    /// Start relaying in a background task
    #[must_use]
    pub fn spawn(config: SubscriberConfig, hub: EventHub) -> SubscriberHandle {
        let subscriber = Self { config, hub };
        SubscriberHandle {
            task: tokio::spawn(subscriber.run()),
        }
    }

    async fn run(self) {
        loop {
            match self.listen().await {
                Ok(()) => tracing::warn!("Pub/Sub stream ended, reconnecting"),
                Err(e) => tracing::error!(error = %e, "Subscriber error, reconnecting"),
            }
            tokio::time::sleep(self.config.reconnect_delay).await;
        }
    }

    async fn listen(&self) -> Result<(), redis::RedisError> {
        let client = Client::open(self.config.redis_url.as_str())?;
        let mut pubsub = client.get_async_pubsub().await?;

        for channel in PubSubChannel::ALL {
            pubsub.subscribe(channel.name()).await?;
        }

        tracing::info!(
            url = %redact_url(&self.config.redis_url),
            "Subscriber connected to Redis"
        );

        let mut stream = pubsub.into_on_message();
        while let Some(msg) = stream.next().await {
            let channel = msg.get_channel_name().to_string();
            let payload: String = match msg.get_payload() {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(channel = %channel, error = %e, "Unreadable Pub/Sub payload");
                    continue;
                }
            };

            if let Some(event) = decode(&payload) {
                let observers = self.hub.send(event);
                tracing::trace!(channel = %channel, observers, "Relayed Pub/Sub event");
            } else {
                tracing::warn!(channel = %channel, "Dropping undecodable Pub/Sub event");
            }
        }

        Ok(())
    }
}

fn decode(payload: &str) -> Option<DomainEvent> {
    serde_json::from_str(payload).ok()
}
