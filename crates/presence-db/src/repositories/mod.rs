//! Repository implementations
//!
//! Implementations of the `UserRepository` port defined in presence-core.

mod error;
mod memory;
mod user;

pub use memory::InMemoryUserRepository;
pub use user::PgUserRepository;
