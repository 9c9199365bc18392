//! Login session storage

mod memory_store;
mod redis_store;

pub use memory_store::InMemorySessionStore;
pub use redis_store::RedisSessionStore;
