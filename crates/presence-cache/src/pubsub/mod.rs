//! Presence event distribution.
//!
//! Publishers push [`DomainEvent`](presence_core::DomainEvent)s either straight
//! into the local [`EventHub`] or through Redis Pub/Sub, where a [`Subscriber`]
//! on every instance relays them into that instance's hub.

mod channels;
mod hub;
mod publisher;
mod subscriber;

pub use channels::{PubSubChannel, PRESENCE_CHANNEL, USERS_CHANNEL};
pub use hub::{EventHub, LocalEventPublisher};
pub use publisher::RedisEventPublisher;
pub use subscriber::{Subscriber, SubscriberConfig, SubscriberHandle};
