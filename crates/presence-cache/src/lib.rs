//! # presence-cache
//!
//! Session storage and presence event distribution.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Login sessions in Redis (with TTL) or in process memory
//! - **Pub/Sub**: Presence events fanned out across instances through Redis,
//!   then to local observers through an [`EventHub`]
//!
//! ## Example
//!
//! ```ignore
//! use presence_cache::{EventHub, RedisEventPublisher, RedisPool, Subscriber, SubscriberConfig};
//!
//! let pool = RedisPool::from_config(&redis_config)?;
//! let hub = EventHub::default();
//!
//! // Relay events published by any instance to this instance's observers
//! let subscriber = Subscriber::spawn(SubscriberConfig::new(&redis_config.url), hub.clone());
//!
//! let publisher = RedisEventPublisher::new(pool.clone());
//! publisher.publish(&DomainEvent::presence_updated(&user)).await?;
//! ```

pub mod pool;
pub mod pubsub;
pub mod session;

pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError, RedisResult};
pub use pubsub::{
    EventHub, LocalEventPublisher, PubSubChannel, RedisEventPublisher, Subscriber,
    SubscriberConfig, SubscriberHandle, PRESENCE_CHANNEL, USERS_CHANNEL,
};
pub use session::{InMemorySessionStore, RedisSessionStore};
